//! The fused occupancy map.
//!
//! [`GridMap`] owns the occupancy cells, the marker footprint layer and the
//! last marker descriptor. The fusion, rasterization, inflation, marker and
//! visibility operations are implemented on it in their own modules.

use glam::{IVec2, Vec2};

use crate::grid::Grid2d;
use crate::iterators::CellWindow;
use crate::types::{CellState, GridConfig, GridError, GridInfo, MarkerDescriptor};

#[derive(Debug, Clone)]
pub struct GridMap {
    pub(crate) info: GridInfo,
    pub(crate) cells: Grid2d<CellState>,
    pub(crate) marker_layer: Grid2d<bool>,
    pub(crate) marker: Option<MarkerDescriptor>,
}

impl GridMap {
    /// Create an all-unknown map. Fails if the config has a non-positive
    /// resolution or extent.
    pub fn new(config: GridConfig) -> Result<Self, GridError> {
        let info = config.validate()?;
        Ok(Self {
            cells: Grid2d::filled(info.width, info.height, CellState::Unknown),
            marker_layer: Grid2d::filled(info.width, info.height, false),
            marker: None,
            info,
        })
    }

    pub fn info(&self) -> &GridInfo {
        &self.info
    }

    /// Number of columns.
    pub fn width(&self) -> u32 {
        self.info.width
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.info.height
    }

    pub fn resolution(&self) -> f32 {
        self.info.resolution
    }

    pub fn inflation_radius_cells(&self) -> i32 {
        self.info.inflation_radius_cells
    }

    pub fn cells(&self) -> &Grid2d<CellState> {
        &self.cells
    }

    pub fn marker_layer(&self) -> &Grid2d<bool> {
        &self.marker_layer
    }

    pub fn marker(&self) -> Option<&MarkerDescriptor> {
        self.marker.as_ref()
    }

    /// Window covering every cell of the map.
    pub fn bounds(&self) -> CellWindow {
        CellWindow::full(self.info.width, self.info.height)
    }

    /// State of a cell, or `None` if it is outside the grid.
    pub fn get(&self, cell: IVec2) -> Option<CellState> {
        self.cells.get(cell).copied()
    }

    /// Whether the marker footprint covers a cell. Out-of-range cells are not covered.
    pub fn is_marker(&self, cell: IVec2) -> bool {
        self.marker_layer.get(cell).copied().unwrap_or(false)
    }

    /// See [`GridInfo::world_to_grid`].
    #[inline]
    pub fn world_to_grid(&self, world: Vec2) -> IVec2 {
        self.info.world_to_grid(world)
    }

    /// See [`GridInfo::cell_center_world`].
    #[inline]
    pub fn cell_center_world(&self, cell: IVec2) -> Vec2 {
        self.info.cell_center_world(cell)
    }

    /// Count the cells currently in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.data().iter().filter(|&&c| c == state).count()
    }

    /// Row-major copy of the cell ordinals (`-1`, `0`, `1`).
    pub fn snapshot(&self) -> Vec<i8> {
        self.cells.data().iter().map(|c| c.value()).collect()
    }

    /// Forget everything: all cells unknown, no marker.
    pub fn reset(&mut self) {
        self.cells.fill(CellState::Unknown);
        self.marker_layer.fill(false);
        self.marker = None;
    }

    /// Set an in-range cell occupied. Returns false if the cell is outside the grid.
    #[inline]
    pub(crate) fn occupy(&mut self, cell: IVec2) -> bool {
        match self.cells.get_mut(cell) {
            Some(slot) => {
                *slot = CellState::Occupied;
                true
            }
            None => false,
        }
    }

    /// Set an in-range cell free unless it is already occupied.
    #[inline]
    pub(crate) fn free_unless_occupied(&mut self, cell: IVec2) {
        if let Some(slot) = self.cells.get_mut(cell)
            && !slot.is_occupied()
        {
            *slot = CellState::Free;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_map() -> GridMap {
        GridMap::new(GridConfig::new(20.0, 20.0, 0.2, 0.5)).unwrap()
    }

    #[test]
    fn starts_unknown_without_marker() {
        let map = field_map();
        assert_eq!(map.width(), 100);
        assert_eq!(map.height(), 100);
        assert_eq!(map.count(CellState::Unknown), 100 * 100);
        assert!(map.marker().is_none());
        assert!(map.marker_layer().data().iter().all(|&m| !m));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = GridMap::new(GridConfig::new(20.0, 20.0, 0.0, 0.5)).unwrap_err();
        assert!(matches!(err, GridError::InvalidConfig(_)));
    }

    #[test]
    fn free_never_downgrades_occupied() {
        let mut map = field_map();
        let cell = IVec2::new(10, 10);
        assert!(map.occupy(cell));
        map.free_unless_occupied(cell);
        assert_eq!(map.get(cell), Some(CellState::Occupied));

        let other = IVec2::new(11, 10);
        map.free_unless_occupied(other);
        assert_eq!(map.get(other), Some(CellState::Free));
    }

    #[test]
    fn out_of_range_writes_are_dropped() {
        let mut map = field_map();
        assert!(!map.occupy(IVec2::new(-1, 5)));
        map.free_unless_occupied(IVec2::new(100, 5));
        assert_eq!(map.count(CellState::Unknown), 100 * 100);
    }

    #[test]
    fn bounds_cover_the_grid() {
        let bounds = field_map().bounds();
        assert_eq!(bounds.min, IVec2::ZERO);
        assert_eq!(bounds.max, IVec2::new(99, 99));
        assert_eq!(bounds.cells().count(), 100 * 100);
    }

    #[test]
    fn snapshot_and_reset() {
        let mut map = field_map();
        map.occupy(IVec2::new(1, 0));
        let snapshot = map.snapshot();
        assert_eq!(snapshot.len(), 100 * 100);
        assert_eq!(snapshot[1], 1);
        assert_eq!(snapshot[0], -1);

        map.reset();
        assert_eq!(map.count(CellState::Occupied), 0);
    }
}
