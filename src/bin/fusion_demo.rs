use std::error::Error;
use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::EnvFilter;

use occupancy_fusion::types::CellState;
use occupancy_fusion::visualization::save_png;
use occupancy_fusion::{GridConfig, GridMap, MarkerRecord, ObstacleRecord, load_scene};

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = std::env::args().skip(1);
    let scene_path = args.next();
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("occupancy_grid.png"));

    let map = match scene_path {
        Some(path) => {
            info!(%path, "loading scene");
            load_scene(&path)?.apply()?
        }
        None => {
            info!("no scene given, using the built-in field");
            builtin_field()?
        }
    };

    info!(
        width = map.width(),
        height = map.height(),
        occupied = map.count(CellState::Occupied),
        free = map.count(CellState::Free),
        marker = map.marker().is_some(),
        "fused grid"
    );

    save_png(&map, &output)?;
    info!(output = %output.display(), "wrote grid image");
    Ok(())
}

fn builtin_field() -> Result<GridMap, Box<dyn Error>> {
    let mut map = GridMap::new(GridConfig::new(20.0, 20.0, 0.2, 0.3))?;

    let obstacles: Vec<ObstacleRecord> = serde_yaml::from_str(
        r#"
- { x: -1.5, y: 2.0, radius_m: 0.4 }
- { bbox: [-3.0, -1.0, -2.0, 0.5], radius_m: 0.2 }
- { points: [[1.0, 1.0], [1.2, 1.1], [1.4, 1.05]] }
"#,
    )?;
    map.update_from_obstacle_records(&obstacles, 0.0);
    map.mark_visible_area(0.0, 0.0, 10.0);
    map.update_from_aruco_marker(Some(&MarkerRecord::new(1.0, 0.0, 0.4, 0.0)))?;
    Ok(map)
}
