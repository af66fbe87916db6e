//! Obstacle inflation.
//!
//! Every primitive that establishes an occupied cell stamps a disk of
//! `inflation_radius_cells` around it. Explicit obstacle radii therefore
//! compound with the configured safety margin.

use glam::IVec2;

use crate::grid::GridMap;
use crate::iterators::DiskIterator;
use crate::types::CellState;

/// Convert an inflation margin in world units (meters) to a cell count.
///
/// Returns `floor(radius / resolution)`. Non-positive or non-finite inputs give 0.
#[inline]
pub fn inflation_radius_to_cells(radius_m: f32, resolution: f32) -> i32 {
    if resolution <= 0.0 || radius_m <= 0.0 || !radius_m.is_finite() {
        return 0;
    }
    (radius_m / resolution).floor() as i32
}

impl GridMap {
    /// Mark every in-range cell within the inflation radius of `center` occupied.
    ///
    /// Never clears a cell. No-op when the inflation radius is zero.
    pub fn inflate_occupied(&mut self, center: IVec2) {
        let radius = self.info.inflation_radius_cells;
        if radius <= 0 {
            return;
        }

        for cell in DiskIterator::within(center, radius, self.bounds()) {
            if let Some(slot) = self.cells.get_mut(cell) {
                *slot = CellState::Occupied;
            }
        }
    }

    /// Mark one cell occupied and inflate around it. Out-of-range cells are ignored.
    pub(crate) fn occupy_and_inflate(&mut self, cell: IVec2) {
        if self.occupy(cell) {
            self.inflate_occupied(cell);
        }
    }
}
