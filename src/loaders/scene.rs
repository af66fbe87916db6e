//! YAML scene files: grid configuration plus the inputs to fuse into it.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::grid::GridMap;
use crate::loaders::raster::{RasterThresholds, load_local_raster};
use crate::types::{
    DEFAULT_OBSTACLE_RADIUS_M, GridConfig, GridError, MarkerRecord, ObstacleRecord,
};

#[derive(Debug, Clone, Deserialize)]
pub struct Scene {
    pub grid: GridConfig,
    #[serde(default = "default_radius")]
    pub default_radius_m: f32,
    #[serde(default)]
    pub obstacles: Vec<ObstacleRecord>,
    #[serde(default)]
    pub marker: Option<MarkerRecord>,
    #[serde(default)]
    pub local_raster: Option<RasterSource>,
    #[serde(default)]
    pub visibility: Option<VisibilitySource>,
    /// Directory that relative paths inside the scene resolve against.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

fn default_radius() -> f32 {
    DEFAULT_OBSTACLE_RADIUS_M
}

/// Image-derived raster placed around the drone position.
#[derive(Debug, Clone, Deserialize)]
pub struct RasterSource {
    pub image: PathBuf,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub drone_x: f32,
    pub drone_y: f32,
    #[serde(default)]
    pub thresholds: RasterThresholds,
}

/// Explicit request to run visibility marking from a drone position.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct VisibilitySource {
    pub drone_x: f32,
    pub drone_y: f32,
    pub view_radius_m: f32,
}

/// Parse a scene file. Relative image paths resolve against the file's directory.
pub fn load_scene(path: impl AsRef<Path>) -> Result<Scene, GridError> {
    let path = path.as_ref();
    let yaml = std::fs::read_to_string(path)?;
    let mut scene: Scene = serde_yaml::from_str(&yaml)?;
    scene.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    Ok(scene)
}

impl Scene {
    /// Build the map and fuse every input: local raster, obstacles, visibility,
    /// then the marker overlay.
    pub fn apply(&self) -> Result<GridMap, GridError> {
        let mut map = GridMap::new(self.grid)?;

        if let Some(source) = &self.local_raster {
            let size = source.width.zip(source.height);
            let image_path = resolve_path(&self.base_dir, &source.image);
            let raster = load_local_raster(&image_path, size, source.thresholds)?;
            map.update_from_local_grid(&raster, source.drone_x, source.drone_y);
        }

        let applied = map.update_from_obstacle_records(&self.obstacles, self.default_radius_m);
        if applied < self.obstacles.len() {
            tracing::info!(
                skipped = self.obstacles.len() - applied,
                "some obstacle records had no usable shape"
            );
        }

        if let Some(view) = self.visibility {
            map.mark_visible_area(view.drone_x, view.drone_y, view.view_radius_m);
        }

        if let Some(marker) = &self.marker {
            map.update_from_aruco_marker(Some(marker))?;
        }

        Ok(map)
    }
}

fn resolve_path(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
