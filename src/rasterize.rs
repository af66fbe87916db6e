//! Fill primitives: disks, axis-aligned boxes and polygons.
//!
//! The occupied variants inflate every cell they write. The marker variant
//! only touches the marker layer.

use glam::{IVec2, Vec2};

use crate::grid::GridMap;
use crate::iterators::{CellWindow, DiskIterator, PolygonIterator};

impl GridMap {
    /// Occupy every cell within `radius_cells` of `center` and inflate each one.
    ///
    /// A non-positive radius occupies only the center. The effective footprint
    /// is a disk of `radius_cells + inflation_radius_cells`. Only the part of
    /// the disk inside the grid is visited.
    pub fn mark_disk_occupied(&mut self, center: IVec2, radius_cells: i32) {
        if radius_cells <= 0 {
            self.occupy_and_inflate(center);
            return;
        }

        for cell in DiskIterator::within(center, radius_cells, self.bounds()) {
            self.occupy_and_inflate(cell);
        }
    }

    /// Occupy a world point grown by `radius_m`. Non-finite points are skipped.
    pub fn mark_point_occupied(&mut self, point: Vec2, radius_m: f32) {
        if !point.is_finite() {
            tracing::debug!(%point, "skipping non-finite obstacle point");
            return;
        }
        let center = self.world_to_grid(point);
        let radius_cells = self.info.meters_to_cells(radius_m);
        self.mark_disk_occupied(center, radius_cells);
    }

    /// Occupy the cells whose centers fall inside the box grown by `padding_m`.
    ///
    /// Corners may be given in any order. The box is closed: centers exactly on
    /// the boundary are included. Negative padding counts as zero. Boxes with a
    /// non-finite corner or padding are skipped.
    pub fn mark_bbox_occupied(&mut self, corner_a: Vec2, corner_b: Vec2, padding_m: f32) {
        if !(corner_a.is_finite() && corner_b.is_finite() && padding_m.is_finite()) {
            tracing::debug!(%corner_a, %corner_b, padding_m, "skipping non-finite box");
            return;
        }

        let padding = Vec2::splat(padding_m.max(0.0));
        let min = corner_a.min(corner_b) - padding;
        let max = corner_a.max(corner_b) + padding;

        let window = CellWindow::around_world_box(&self.info, min, max);
        for cell in window.cells() {
            let center = self.info.cell_center_world(cell);
            if center.cmpge(min).all() && center.cmple(max).all() {
                self.occupy_and_inflate(cell);
            }
        }
    }

    /// Occupy the cells whose centers fall inside `polygon` (even-odd rule).
    ///
    /// Polygons with fewer than three vertices are ignored.
    pub fn mark_polygon_occupied(&mut self, polygon: &[Vec2]) {
        let Some(cells) = PolygonIterator::new(&self.info, polygon) else {
            return;
        };
        for cell in cells {
            self.occupy_and_inflate(cell);
        }
    }

    /// Set the marker layer for the cells whose centers fall inside `polygon`.
    ///
    /// Occupancy is untouched and nothing is inflated.
    pub fn mark_polygon_marker(&mut self, polygon: &[Vec2]) {
        let Some(cells) = PolygonIterator::new(&self.info, polygon) else {
            return;
        };
        for cell in cells {
            if let Some(slot) = self.marker_layer.get_mut(cell) {
                *slot = true;
            }
        }
    }

    /// Convenience for a single point obstacle without an explicit radius.
    /// Points outside the grid are ignored.
    pub fn add_obstacle(&mut self, x: f32, y: f32) {
        self.mark_point_occupied(Vec2::new(x, y), 0.0);
    }
}
