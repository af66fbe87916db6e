use glam::{IVec2, Vec2};

use crate::iterators::CellWindow;
use crate::types::{GridInfo, POLYGON_EDGE_EPSILON};

/// Even-odd ray-casting test: cast a ray in +x from `point` and count edge
/// crossings. An edge counts when exactly one endpoint lies strictly above the
/// test height.
///
/// The crossing abscissa divides by the edge height plus
/// [`POLYGON_EDGE_EPSILON`], so the test is a tolerance-based predicate:
/// points lying exactly on an edge may be classified either way.
pub fn point_in_polygon(point: Vec2, polygon: &[Vec2]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let pi = polygon[i];
        let pj = polygon[j];
        if (pi.y > point.y) != (pj.y > point.y) {
            let cross_x =
                (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y + POLYGON_EDGE_EPSILON) + pi.x;
            if point.x < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Iterator over grid cells whose centers lie inside a polygon.
///
/// Points are expected in world coordinates (meters). Works for concave and
/// self-intersecting outlines (even-odd rule).
pub struct PolygonIterator {
    info: GridInfo,
    points: Vec<Vec2>,
    cells: Box<dyn Iterator<Item = IVec2>>,
}

impl PolygonIterator {
    /// Returns `None` for polygons with fewer than three vertices or with a
    /// non-finite vertex.
    pub fn new(info: &GridInfo, points: &[Vec2]) -> Option<Self> {
        if points.len() < 3 || !points.iter().all(|p| p.is_finite()) {
            return None;
        }

        let (min, max) = points.iter().fold(
            (Vec2::splat(f32::INFINITY), Vec2::splat(f32::NEG_INFINITY)),
            |(min, max), p| (min.min(*p), max.max(*p)),
        );
        let window = CellWindow::around_world_box(info, min, max);

        Some(Self {
            info: *info,
            points: points.to_vec(),
            cells: Box::new(window.cells()),
        })
    }
}

impl Iterator for PolygonIterator {
    type Item = IVec2;

    fn next(&mut self) -> Option<Self::Item> {
        for cell in self.cells.by_ref() {
            let center = self.info.cell_center_world(cell);
            if point_in_polygon(center, &self.points) {
                return Some(cell);
            }
        }
        None
    }
}
