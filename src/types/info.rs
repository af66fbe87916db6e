//! Grid configuration, derived metadata and the world/cell transform.

use glam::{IVec2, Vec2};
use serde::Deserialize;

use crate::inflation::inflation_radius_to_cells;
use crate::types::GridError;

/// Construction parameters of a [`GridMap`](crate::GridMap).
///
/// The mapped region is centered on the world origin.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GridConfig {
    pub width_meters: f32,
    pub height_meters: f32,
    pub resolution: f32,
    #[serde(default)]
    pub inflation_meters: f32,
}

impl GridConfig {
    pub fn new(
        width_meters: f32,
        height_meters: f32,
        resolution: f32,
        inflation_meters: f32,
    ) -> Self {
        Self {
            width_meters,
            height_meters,
            resolution,
            inflation_meters,
        }
    }

    /// Check the config and derive cell counts from it.
    ///
    /// Negative inflation is clamped to zero rather than rejected.
    pub fn validate(&self) -> Result<GridInfo, GridError> {
        check_positive("resolution", self.resolution)?;
        check_positive("width_meters", self.width_meters)?;
        check_positive("height_meters", self.height_meters)?;
        if !self.inflation_meters.is_finite() {
            return Err(GridError::InvalidConfig(format!(
                "inflation_meters must be finite, got {}",
                self.inflation_meters
            )));
        }

        let width = (self.width_meters / self.resolution).ceil();
        let height = (self.height_meters / self.resolution).ceil();
        if width > i32::MAX as f32 || height > i32::MAX as f32 {
            return Err(GridError::InvalidConfig(format!(
                "grid of {width}x{height} cells is too large"
            )));
        }

        let inflation_meters = self.inflation_meters.max(0.0);
        let inflation_radius_cells = inflation_radius_to_cells(inflation_meters, self.resolution);

        Ok(GridInfo {
            width: width as u32,
            height: height as u32,
            resolution: self.resolution,
            width_meters: self.width_meters,
            height_meters: self.height_meters,
            inflation_meters,
            inflation_radius_cells,
        })
    }
}

#[inline]
fn axis_index(cell: f32) -> i32 {
    if cell.is_nan() {
        i32::MIN
    } else {
        cell as i32
    }
}

fn check_positive(name: &str, value: f32) -> Result<(), GridError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GridError::InvalidConfig(format!(
            "{name} must be positive and finite, got {value}"
        )))
    }
}

/// Validated grid metadata.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridInfo {
    /// Number of columns.
    pub width: u32,
    /// Number of rows.
    pub height: u32,
    pub resolution: f32,
    pub width_meters: f32,
    pub height_meters: f32,
    pub inflation_meters: f32,
    pub inflation_radius_cells: i32,
}

impl GridInfo {
    /// Cell containing a world point. `x` is the column and `y` the row.
    ///
    /// The result may lie outside the grid; callers bounds-check before use.
    /// Indices saturate at the `i32` range, and a NaN coordinate maps to
    /// `i32::MIN` so it can never land on a real cell.
    #[inline]
    pub fn world_to_grid(&self, world: Vec2) -> IVec2 {
        let col = ((world.x + self.width_meters / 2.0) / self.resolution).floor();
        let row = ((world.y + self.height_meters / 2.0) / self.resolution).floor();
        IVec2::new(axis_index(col), axis_index(row))
    }

    /// World position of a cell's center.
    #[inline]
    pub fn cell_center_world(&self, cell: IVec2) -> Vec2 {
        Vec2::new(
            (cell.x as f32 + 0.5) * self.resolution - self.width_meters / 2.0,
            (cell.y as f32 + 0.5) * self.resolution - self.height_meters / 2.0,
        )
    }

    /// Convert a length in meters to whole cells, flooring and clamping at zero.
    #[inline]
    pub fn meters_to_cells(&self, meters: f32) -> i32 {
        inflation_radius_to_cells(meters, self.resolution)
    }

    #[inline]
    pub fn contains(&self, cell: IVec2) -> bool {
        // equivalent to (x >= 0 && x < width) for signed x
        (cell.x as u32) < self.width && (cell.y as u32) < self.height
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }
}
