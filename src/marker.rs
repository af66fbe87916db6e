//! Fiducial marker overlay.
//!
//! The marker footprint lives in its own boolean layer and never changes the
//! occupancy cells. Every update replaces the previous marker wholesale.

use glam::Vec2;

use crate::grid::GridMap;
use crate::types::{GridError, MarkerDescriptor, MarkerRecord};

impl GridMap {
    /// Place a square marker of edge `size_m` centered at `center`, rotated by `yaw_rad`.
    ///
    /// Rejects a non-positive or non-finite size and leaves the previous marker in place.
    pub fn set_marker(
        &mut self,
        center: Vec2,
        size_m: f32,
        yaw_rad: f32,
    ) -> Result<(), GridError> {
        if !(size_m.is_finite() && size_m > 0.0) {
            return Err(GridError::InvalidMarker(format!(
                "size_m must be positive, got {size_m}"
            )));
        }
        if !center.is_finite() || !yaw_rad.is_finite() {
            return Err(GridError::InvalidMarker(format!(
                "marker pose must be finite, got center {center} yaw {yaw_rad}"
            )));
        }

        let descriptor = MarkerDescriptor::square(center, size_m, yaw_rad);
        self.marker_layer.fill(false);
        self.mark_polygon_marker(&descriptor.corners);
        self.marker = Some(descriptor);
        Ok(())
    }

    /// Remove the marker and clear its footprint.
    pub fn clear_marker(&mut self) {
        self.marker = None;
        self.marker_layer.fill(false);
    }

    /// Apply a detector record.
    ///
    /// `None` or an empty record clears the marker. A record missing `x`, `y`
    /// or `size_m` is ignored and the previous marker is kept.
    pub fn update_from_aruco_marker(
        &mut self,
        record: Option<&MarkerRecord>,
    ) -> Result<(), GridError> {
        let Some(record) = record.filter(|r| !r.is_empty()) else {
            self.clear_marker();
            return Ok(());
        };

        let (Some(x), Some(y), Some(size_m)) = (record.x, record.y, record.size_m) else {
            tracing::debug!(?record, "ignoring marker record with missing fields");
            return Ok(());
        };

        self.set_marker(Vec2::new(x, y), size_m, record.yaw_rad.unwrap_or(0.0))
    }
}
