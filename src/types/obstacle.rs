//! Obstacle descriptors.
//!
//! Detectors emit loosely shaped records ([`ObstacleRecord`]) where any of
//! several fields may be present. They are resolved once into the closed
//! [`Obstacle`] variant before rasterization.

use glam::Vec2;
use serde::Deserialize;

/// A resolved obstacle in world coordinates (meters).
#[derive(Debug, Clone, PartialEq)]
pub enum Obstacle {
    /// Single point, optionally grown by `radius_m`.
    Point { position: Vec2, radius_m: Option<f32> },
    /// Independent points sharing one radius.
    PointList { points: Vec<Vec2>, radius_m: Option<f32> },
    /// Polygon outline. Rasterized vertex by vertex like a point list.
    Polygon { vertices: Vec<Vec2>, radius_m: Option<f32> },
    /// Axis-aligned box; `padding_m` grows it on every side.
    BBox {
        min: Vec2,
        max: Vec2,
        padding_m: Option<f32>,
    },
}

impl Obstacle {
    pub fn point(x: f32, y: f32) -> Self {
        Self::Point {
            position: Vec2::new(x, y),
            radius_m: None,
        }
    }

    pub fn bbox(xmin: f32, ymin: f32, xmax: f32, ymax: f32) -> Self {
        Self::BBox {
            min: Vec2::new(xmin, ymin),
            max: Vec2::new(xmax, ymax),
            padding_m: None,
        }
    }

    /// Replace the per-obstacle radius (or bbox padding).
    pub fn with_radius(mut self, radius: f32) -> Self {
        match &mut self {
            Self::Point { radius_m, .. }
            | Self::PointList { radius_m, .. }
            | Self::Polygon { radius_m, .. } => *radius_m = Some(radius),
            Self::BBox { padding_m, .. } => *padding_m = Some(radius),
        }
        self
    }

    /// Radius or padding carried by the obstacle itself.
    pub fn radius_m(&self) -> Option<f32> {
        match self {
            Self::Point { radius_m, .. }
            | Self::PointList { radius_m, .. }
            | Self::Polygon { radius_m, .. } => *radius_m,
            Self::BBox { padding_m, .. } => *padding_m,
        }
    }

    /// Resolve a loose record. Fields are tried in priority order
    /// `points`, `polygon`, `bbox`, then `x`/`y`; the first one present decides
    /// the variant. Returns `None` for records without a usable shape.
    pub fn from_record(record: &ObstacleRecord) -> Option<Self> {
        let radius_m = record.radius_m;

        if let Some(points) = &record.points {
            return Some(Self::PointList {
                points: to_vec2(points),
                radius_m,
            });
        }

        if let Some(vertices) = &record.polygon {
            return Some(Self::Polygon {
                vertices: to_vec2(vertices),
                radius_m,
            });
        }

        if let Some(bbox) = &record.bbox {
            let (min, max) = bbox.corners()?;
            return Some(Self::BBox {
                min,
                max,
                padding_m: radius_m,
            });
        }

        match (record.x, record.y) {
            (Some(x), Some(y)) => Some(Self::Point {
                position: Vec2::new(x, y),
                radius_m,
            }),
            _ => None,
        }
    }
}

fn to_vec2(points: &[[f32; 2]]) -> Vec<Vec2> {
    points.iter().map(|&p| Vec2::from_array(p)).collect()
}

/// Obstacle as emitted by a detector; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ObstacleRecord {
    pub points: Option<Vec<[f32; 2]>>,
    pub polygon: Option<Vec<[f32; 2]>>,
    pub bbox: Option<BBoxRecord>,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub radius_m: Option<f32>,
}

impl ObstacleRecord {
    pub fn point(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    pub fn with_radius(mut self, radius_m: f32) -> Self {
        self.radius_m = Some(radius_m);
        self
    }
}

/// Bounding box in either of its accepted encodings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BBoxRecord {
    /// `[xmin, ymin, xmax, ymax]`.
    List(Vec<f32>),
    Keyed {
        #[serde(alias = "min_x")]
        xmin: f32,
        #[serde(alias = "min_y")]
        ymin: f32,
        #[serde(alias = "max_x")]
        xmax: f32,
        #[serde(alias = "max_y")]
        ymax: f32,
    },
    /// Anything else; resolves to no obstacle.
    Unrecognized(serde_yaml::Value),
}

impl BBoxRecord {
    /// Corners as `(min, max)`, or `None` when the shape is unusable.
    /// Ordering of the two corners is normalized later by the rasterizer.
    pub fn corners(&self) -> Option<(Vec2, Vec2)> {
        match self {
            Self::List(values) => match values.as_slice() {
                &[xmin, ymin, xmax, ymax] => Some((Vec2::new(xmin, ymin), Vec2::new(xmax, ymax))),
                _ => None,
            },
            Self::Keyed {
                xmin,
                ymin,
                xmax,
                ymax,
            } => Some((Vec2::new(*xmin, *ymin), Vec2::new(*xmax, *ymax))),
            Self::Unrecognized(_) => None,
        }
    }
}
