use glam::{IVec2, Vec2};

use crate::grid::GridMap;
use crate::iterators::{CellWindow, LineIterator};
use crate::types::CellState;

impl GridMap {
    /// Walk the Bresenham line from `start` to `end` and report whether no
    /// traversed cell, the endpoint included, is occupied.
    ///
    /// Cells outside the grid never block.
    pub fn is_line_of_sight_clear(&self, start: IVec2, end: IVec2) -> bool {
        LineIterator::new(start, end)
            .all(|cell| !self.get(cell).is_some_and(CellState::is_occupied))
    }

    /// Resolve unknown cells to free inside the drone's visible disk.
    ///
    /// A cell is freed when its center distance from the drone cell is at most
    /// `view_radius_m / resolution` cells and the line to it is unobstructed.
    /// Occupied cells are never changed and nothing is marked occupied. Only
    /// the part of the disk inside the grid is visited.
    /// Returns the number of cells newly set free.
    pub fn mark_visible_area(&mut self, drone_x: f32, drone_y: f32, view_radius_m: f32) -> usize {
        let drone_world = Vec2::new(drone_x, drone_y);
        if !drone_world.is_finite() {
            tracing::debug!(drone_x, drone_y, "skipping visibility from non-finite position");
            return 0;
        }
        if !(view_radius_m.is_finite() && view_radius_m >= 0.0) {
            tracing::debug!(view_radius_m, "skipping visibility with invalid radius");
            return 0;
        }

        let drone = self.world_to_grid(drone_world);
        let view_radius = f64::from(view_radius_m / self.info.resolution);
        let reach = view_radius.ceil() as i32;
        let radius_sq = view_radius * view_radius;
        let window = CellWindow::around_cell(drone, reach).intersect(self.bounds());

        let mut freed = 0usize;
        for cell in window.cells() {
            let dx = (i64::from(cell.x) - i64::from(drone.x)) as f64;
            let dy = (i64::from(cell.y) - i64::from(drone.y)) as f64;
            if dx * dx + dy * dy > radius_sq {
                continue;
            }

            match self.get(cell) {
                None | Some(CellState::Occupied) => continue,
                Some(state) => {
                    if self.is_line_of_sight_clear(drone, cell) {
                        if state == CellState::Unknown {
                            freed += 1;
                        }
                        self.free_unless_occupied(cell);
                    }
                }
            }
        }

        tracing::trace!(drone_row = drone.y, drone_col = drone.x, freed, "marked visible area");
        freed
    }
}
