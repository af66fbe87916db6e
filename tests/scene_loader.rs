use std::path::{Path, PathBuf};

use glam::{IVec2, Vec2};
use image::{Rgba, RgbaImage};

use occupancy_fusion::loaders::{RasterThresholds, load_local_raster};
use occupancy_fusion::types::{FREE, OCCUPIED, UNKNOWN};
use occupancy_fusion::visualization::{grid_to_image, save_png};
use occupancy_fusion::{CellState, GridError, load_scene};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn scratch_dir(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "occupancy_fusion_{test}_{}",
        std::process::id()
    ));
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

/// 3x3 image: black top row, transparent middle row, white bottom row.
fn write_striped_png(path: &Path) {
    let mut img = RgbaImage::new(3, 3);
    for x in 0..3 {
        img.put_pixel(x, 0, Rgba([0, 0, 0, 255]));
        img.put_pixel(x, 1, Rgba([0, 0, 0, 0]));
        img.put_pixel(x, 2, Rgba([255, 255, 255, 255]));
    }
    img.save(path).expect("write png");
}

#[test]
fn loads_and_applies_fixture_scene() {
    let scene = load_scene(fixture("scene.yaml")).expect("scene should load");
    assert_eq!(scene.obstacles.len(), 4);
    assert!(scene.visibility.is_some());

    let map = scene.apply().expect("scene should apply");
    assert_eq!((map.width(), map.height()), (100, 100));

    // Point at the origin, inflated by two cells.
    assert_eq!(map.get(IVec2::new(52, 50)), Some(CellState::Occupied));
    // Keyed bbox in the lower-left quadrant.
    let bbox_cell = map.world_to_grid(Vec2::new(-5.5, -5.5));
    assert_eq!(map.get(bbox_cell), Some(CellState::Occupied));
    // Point list entries.
    let listed = map.world_to_grid(Vec2::new(4.4, 4.0));
    assert_eq!(map.get(listed), Some(CellState::Occupied));

    // The sweep from cell (50, 35) frees up to the inflated point, not past it.
    assert_eq!(map.get(IVec2::new(50, 35)), Some(CellState::Free));
    assert_eq!(map.get(IVec2::new(50, 47)), Some(CellState::Free));
    assert_eq!(map.get(IVec2::new(50, 48)), Some(CellState::Occupied));
    assert_eq!(map.get(IVec2::new(50, 49)), Some(CellState::Unknown));

    let marker = map.marker().expect("marker should be set");
    assert_eq!(marker.center, Vec2::new(1.0, 0.0));
    assert!(map.is_marker(IVec2::new(55, 50)));
}

#[test]
fn missing_scene_file_is_io_error() {
    let err = load_scene(fixture("does_not_exist.yaml")).unwrap_err();
    assert!(matches!(err, GridError::Io(_)));
}

#[test]
fn malformed_scene_is_yaml_error() {
    let dir = scratch_dir("malformed");
    let path = dir.join("scene.yaml");
    std::fs::write(&path, "grid: [not, a, mapping]\n").unwrap();
    assert!(matches!(load_scene(&path), Err(GridError::Yaml(_))));
}

#[test]
fn image_is_classified_into_local_raster() {
    let dir = scratch_dir("classify");
    let path = dir.join("local.png");
    write_striped_png(&path);

    let raster = load_local_raster(&path, None, RasterThresholds::default()).unwrap();
    assert_eq!((raster.width(), raster.height()), (3, 3));
    assert_eq!(raster.get(IVec2::new(1, 0)), Some(OCCUPIED));
    assert_eq!(raster.get(IVec2::new(1, 1)), Some(UNKNOWN));
    assert_eq!(raster.get(IVec2::new(1, 2)), Some(FREE));
}

#[test]
fn scene_with_local_raster_resolves_relative_image() {
    let dir = scratch_dir("raster_scene");
    write_striped_png(&dir.join("local.png"));
    let scene_path = dir.join("scene.yaml");
    std::fs::write(
        &scene_path,
        "grid: { width_meters: 10, height_meters: 10, resolution: 1 }\n\
         local_raster: { image: local.png, drone_x: 0.5, drone_y: 0.5 }\n",
    )
    .unwrap();

    let map = load_scene(&scene_path).unwrap().apply().unwrap();

    // Drone cell (5, 5); the image top row lands one row above it.
    assert_eq!(map.get(IVec2::new(5, 6)), Some(CellState::Occupied));
    assert_eq!(map.get(IVec2::new(5, 5)), Some(CellState::Unknown));
    assert_eq!(map.get(IVec2::new(5, 4)), Some(CellState::Free));
    assert_eq!(map.count(CellState::Occupied), 3);
    assert_eq!(map.count(CellState::Free), 3);
}

#[test]
fn saved_png_matches_rendered_image() {
    let scene = load_scene(fixture("scene.yaml")).unwrap();
    let map = scene.apply().unwrap();
    let dir = scratch_dir("render");
    let path = dir.join("grid.png");

    save_png(&map, &path).unwrap();

    let written = image::open(&path).unwrap().to_rgb8();
    assert_eq!(written, grid_to_image(&map));
}
