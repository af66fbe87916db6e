//! Fusing local rasters and obstacle descriptors into the global map.
//!
//! Merge policy, shared by every input:
//! - unknown sources never write,
//! - occupied sources always win and are inflated,
//! - free sources only write where the map is not already occupied.

use glam::{IVec2, Vec2};

use crate::grid::{Grid2d, GridMap};
use crate::types::{GridError, OCCUPIED, Obstacle, ObstacleRecord, UNKNOWN};

/// Drone-centered raster in image convention: row 0 is the top row.
///
/// Values follow the cell ordinals (`-1` unknown, `0` free, `1` occupied);
/// any other value is treated as free.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalRaster {
    grid: Grid2d<i8>,
}

impl LocalRaster {
    pub fn new(width: u32, height: u32, data: Vec<i8>) -> Result<Self, GridError> {
        Ok(Self {
            grid: Grid2d::new(width, height, data)?,
        })
    }

    /// Build from rows listed top to bottom. All rows must have the same length.
    pub fn from_rows(rows: &[Vec<i8>]) -> Result<Self, GridError> {
        let width = rows.first().map_or(0, Vec::len);
        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(GridError::InvalidRaster(format!(
                "row {idx} has {} cells, expected {width}",
                row.len()
            )));
        }
        let data = rows.iter().flatten().copied().collect();
        Self::new(width as u32, rows.len() as u32, data)
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.data().is_empty()
    }

    /// Value at image position (`x` = column, `y` = row from the top).
    pub fn get(&self, cell: IVec2) -> Option<i8> {
        self.grid.get(cell).copied()
    }
}

impl GridMap {
    /// Composite a local raster centered on the drone.
    ///
    /// The raster is flipped vertically on ingestion (its row 0 is the image
    /// top, the map's row 0 is the lowest `y`), then raster cell `(i, j)` lands
    /// at the drone cell offset by `(i - height / 2, j - width / 2)`.
    /// Cells falling outside the map are dropped. A non-finite drone position
    /// drops the whole raster.
    pub fn update_from_local_grid(&mut self, raster: &LocalRaster, drone_x: f32, drone_y: f32) {
        if raster.is_empty() {
            return;
        }
        let drone_world = Vec2::new(drone_x, drone_y);
        if !drone_world.is_finite() {
            tracing::debug!(drone_x, drone_y, "skipping local raster at non-finite position");
            return;
        }

        let drone = self.world_to_grid(drone_world);
        let (w, h) = (raster.width() as i32, raster.height() as i32);
        let mut written = 0usize;

        for i in 0..h {
            for j in 0..w {
                let Some(value) = raster.get(IVec2::new(j, h - 1 - i)) else {
                    continue;
                };
                if value == UNKNOWN {
                    continue;
                }

                let cell = drone.saturating_add(IVec2::new(j - w / 2, i - h / 2));
                if !self.cells.contains(cell) {
                    continue;
                }

                if value == OCCUPIED {
                    self.occupy_and_inflate(cell);
                } else {
                    self.free_unless_occupied(cell);
                }
                written += 1;
            }
        }

        tracing::trace!(
            width = w,
            height = h,
            drone_row = drone.y,
            drone_col = drone.x,
            written,
            "fused local raster"
        );
    }

    /// Rasterize resolved obstacles.
    ///
    /// Points, point lists and polygon vertices become disks of the obstacle's
    /// radius (or `default_radius_m`); boxes use the radius as padding.
    pub fn update_from_obstacles(&mut self, obstacles: &[Obstacle], default_radius_m: f32) {
        for obstacle in obstacles {
            let radius_m = obstacle.radius_m().unwrap_or(default_radius_m);
            match obstacle {
                Obstacle::Point { position, .. } => self.mark_point_occupied(*position, radius_m),
                Obstacle::PointList { points, .. } => self.mark_points(points, radius_m),
                Obstacle::Polygon { vertices, .. } => self.mark_points(vertices, radius_m),
                Obstacle::BBox { min, max, .. } => self.mark_bbox_occupied(*min, *max, radius_m),
            }
        }
        tracing::trace!(count = obstacles.len(), "fused obstacles");
    }

    /// Resolve loose records and rasterize them. Records without a usable
    /// shape are skipped. Returns the number of obstacles applied.
    pub fn update_from_obstacle_records(
        &mut self,
        records: &[ObstacleRecord],
        default_radius_m: f32,
    ) -> usize {
        let obstacles: Vec<Obstacle> = records
            .iter()
            .enumerate()
            .filter_map(|(idx, record)| {
                let obstacle = Obstacle::from_record(record);
                if obstacle.is_none() {
                    tracing::debug!(index = idx, ?record, "skipping obstacle record");
                }
                obstacle
            })
            .collect();
        self.update_from_obstacles(&obstacles, default_radius_m);
        obstacles.len()
    }

    fn mark_points(&mut self, points: &[Vec2], radius_m: f32) {
        let radius_cells = self.info.meters_to_cells(radius_m);
        for point in points {
            if !point.is_finite() {
                tracing::debug!(%point, "skipping non-finite obstacle point");
                continue;
            }
            let center = self.world_to_grid(*point);
            self.mark_disk_occupied(center, radius_cells);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CellState, GridConfig};

    fn unit_map(inflation_meters: f32) -> GridMap {
        // 10 x 10 cells of 1 m; the origin maps to cell (5, 5).
        GridMap::new(GridConfig::new(10.0, 10.0, 1.0, inflation_meters)).unwrap()
    }

    #[test]
    fn raster_rejects_ragged_rows() {
        let err = LocalRaster::from_rows(&[vec![0, 0], vec![0]]).unwrap_err();
        assert!(matches!(err, GridError::InvalidRaster(_)));
        assert!(LocalRaster::new(2, 2, vec![0; 3]).is_err());
    }

    #[test]
    fn empty_raster_is_noop() {
        let mut map = unit_map(0.0);
        let raster = LocalRaster::from_rows(&[]).unwrap();
        assert!(raster.is_empty());
        map.update_from_local_grid(&raster, 0.0, 0.0);
        assert_eq!(map.count(CellState::Unknown), 100);
    }

    #[test]
    fn raster_is_flipped_and_centered() {
        let mut map = unit_map(0.0);
        // Top row of the image is occupied on the left; bottom row free.
        let raster = LocalRaster::from_rows(&[vec![1, -1], vec![0, 0]]).unwrap();
        map.update_from_local_grid(&raster, 0.0, 0.0);

        // Image bottom row (i = 0 after flip) lands at row 5 - 1 = 4.
        assert_eq!(map.get(IVec2::new(4, 4)), Some(CellState::Free));
        assert_eq!(map.get(IVec2::new(5, 4)), Some(CellState::Free));
        // Image top row lands at row 5; the unknown cell is not written.
        assert_eq!(map.get(IVec2::new(4, 5)), Some(CellState::Occupied));
        assert_eq!(map.get(IVec2::new(5, 5)), Some(CellState::Unknown));
        assert_eq!(map.count(CellState::Unknown), 97);
    }

    #[test]
    fn occupied_is_sticky_against_free_raster() {
        let mut map = unit_map(0.0);
        map.add_obstacle(0.5, 0.5);
        let raster = LocalRaster::from_rows(&vec![vec![0; 3]; 3]).unwrap();
        map.update_from_local_grid(&raster, 0.5, 0.5);
        assert_eq!(map.get(IVec2::new(5, 5)), Some(CellState::Occupied));
        assert_eq!(map.count(CellState::Free), 8);
    }

    #[test]
    fn raster_occupied_cells_inflate() {
        let mut map = unit_map(1.0);
        let raster = LocalRaster::from_rows(&[vec![1]]).unwrap();
        map.update_from_local_grid(&raster, 0.5, 0.5);
        assert_eq!(map.count(CellState::Occupied), 5);
    }

    #[test]
    fn raster_overlapping_edge_is_clipped() {
        let mut map = unit_map(0.0);
        let raster = LocalRaster::from_rows(&vec![vec![1; 4]; 4]).unwrap();
        // Drone in the corner cell (0, 0): offsets -2..=1 leave a 2x2 patch in range.
        map.update_from_local_grid(&raster, -4.5, -4.5);
        assert_eq!(map.count(CellState::Occupied), 4);
    }

    #[test]
    fn far_or_non_finite_drone_drops_raster() {
        let mut map = unit_map(1.0);
        let raster = LocalRaster::from_rows(&vec![vec![1; 3]; 3]).unwrap();
        map.update_from_local_grid(&raster, 1.0e30, 0.0);
        map.update_from_local_grid(&raster, 0.0, -1.0e30);
        map.update_from_local_grid(&raster, f32::NAN, 0.0);
        map.update_from_local_grid(&raster, 0.0, f32::INFINITY);
        assert_eq!(map.count(CellState::Unknown), 100);
    }

    #[test]
    fn non_finite_points_in_lists_are_skipped() {
        let mut map = unit_map(0.0);
        let list = Obstacle::PointList {
            points: vec![Vec2::new(f32::NAN, 0.0), Vec2::new(0.5, 0.5)],
            radius_m: None,
        };
        map.update_from_obstacles(&[list, Obstacle::point(f32::NAN, f32::NAN)], 0.0);
        assert_eq!(map.count(CellState::Occupied), 1);
        assert_eq!(map.get(IVec2::new(5, 5)), Some(CellState::Occupied));
        assert_eq!(map.get(IVec2::new(0, 0)), Some(CellState::Unknown));
    }

    #[test]
    fn non_vocabulary_values_count_as_free() {
        let mut map = unit_map(0.0);
        let raster = LocalRaster::from_rows(&[vec![7]]).unwrap();
        map.update_from_local_grid(&raster, 0.5, 0.5);
        assert_eq!(map.get(IVec2::new(5, 5)), Some(CellState::Free));
    }

    #[test]
    fn obstacles_use_default_radius_unless_overridden() {
        let mut map = unit_map(0.0);
        map.update_from_obstacles(&[Obstacle::point(0.5, 0.5)], 1.0);
        assert_eq!(map.count(CellState::Occupied), 5);

        let mut map = unit_map(0.0);
        map.update_from_obstacles(&[Obstacle::point(0.5, 0.5).with_radius(0.0)], 1.0);
        assert_eq!(map.count(CellState::Occupied), 1);
    }

    #[test]
    fn polygon_records_mark_vertices_only() {
        let mut map = unit_map(0.0);
        let polygon = Obstacle::Polygon {
            vertices: vec![
                Vec2::new(-2.5, -2.5),
                Vec2::new(2.5, -2.5),
                Vec2::new(2.5, 2.5),
                Vec2::new(-2.5, 2.5),
            ],
            radius_m: None,
        };
        map.update_from_obstacles(&[polygon], 0.0);
        assert_eq!(map.count(CellState::Occupied), 4);
        assert_eq!(map.get(IVec2::new(5, 5)), Some(CellState::Unknown));
    }

    #[test]
    fn bbox_obstacle_uses_radius_as_padding() {
        let mut map = unit_map(0.0);
        map.update_from_obstacles(&[Obstacle::bbox(-0.4, -0.4, 0.4, 0.4).with_radius(0.2)], 0.0);
        assert_eq!(map.count(CellState::Occupied), 4);
    }

    #[test]
    fn records_skip_unusable_entries() {
        let mut map = unit_map(0.0);
        let records: Vec<ObstacleRecord> = serde_yaml::from_str(
            "- {x: 0.5, y: 0.5}\n- {bbox: [1, 2]}\n- {radius_m: 3}\n- {points: [[-3.5, -3.5]]}\n",
        )
        .unwrap();
        let applied = map.update_from_obstacle_records(&records, 0.0);
        assert_eq!(applied, 2);
        assert_eq!(map.count(CellState::Occupied), 2);
    }

    #[test]
    fn empty_obstacle_list_is_noop() {
        let mut map = unit_map(1.0);
        map.update_from_obstacles(&[], 1.0);
        assert_eq!(map.update_from_obstacle_records(&[], 1.0), 0);
        assert_eq!(map.count(CellState::Unknown), 100);
    }
}
