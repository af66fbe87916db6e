//! Fiducial marker geometry.

use glam::Vec2;
use serde::Deserialize;

/// Footprint of the most recently observed fiducial marker, in world meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerDescriptor {
    pub center: Vec2,
    pub size_m: f32,
    pub yaw_rad: f32,
    /// Square corners, counter-clockwise starting from the local (-x, -y) corner.
    pub corners: [Vec2; 4],
}

impl MarkerDescriptor {
    /// Build the descriptor of a square marker of edge `size_m` centered at
    /// `center` and rotated by `yaw_rad`.
    pub fn square(center: Vec2, size_m: f32, yaw_rad: f32) -> Self {
        let half = size_m / 2.0;
        let local = [
            Vec2::new(-half, -half),
            Vec2::new(half, -half),
            Vec2::new(half, half),
            Vec2::new(-half, half),
        ];
        let rotation = Vec2::from_angle(yaw_rad);
        let corners = local.map(|p| center + rotation.rotate(p));
        Self {
            center,
            size_m,
            yaw_rad,
            corners,
        }
    }
}

/// Loosely specified marker observation as delivered by a detector.
///
/// `x`, `y` and `size_m` are required for an update; `yaw_rad` defaults to 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct MarkerRecord {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub size_m: Option<f32>,
    pub yaw_rad: Option<f32>,
}

impl MarkerRecord {
    pub fn new(x: f32, y: f32, size_m: f32, yaw_rad: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            size_m: Some(size_m),
            yaw_rad: Some(yaw_rad),
        }
    }

    /// True if the record carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.size_m.is_none() && self.yaw_rad.is_none()
    }
}
