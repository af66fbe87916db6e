use std::path::Path;

use image::{Rgb, RgbImage};

use crate::grid::{Grid2d, GridMap};
use crate::types::{FREE, GridError, MARKER, OCCUPIED, UNKNOWN};

/// Compose the 4-valued display raster: the occupancy ordinal of each cell,
/// replaced by [`MARKER`] wherever the marker footprint covers it.
///
/// The result is in map orientation (row 0 is the lowest `y`).
pub fn display_raster(map: &GridMap) -> Grid2d<i8> {
    let mut raster = map.cells().map(|state| state.value());
    for (cell, &covered) in map.marker_layer().iter_cells() {
        if covered && let Some(slot) = raster.get_mut(cell.as_ivec2()) {
            *slot = MARKER;
        }
    }
    raster
}

/// Render the map as an RGB image.
///
/// - **UNKNOWN** becomes mid-gray.
/// - **FREE** becomes white.
/// - **OCCUPIED** becomes black.
/// - **MARKER** becomes red.
///
/// The map's row 0 (lowest `y`) is written to the **bottom** of the image so
/// that world +y points up.
pub fn grid_to_image(map: &GridMap) -> RgbImage {
    let raster = display_raster(map);
    let width = raster.width();
    let height = raster.height();
    let mut img = RgbImage::new(width, height);

    for (cell, &value) in raster.iter_cells() {
        let y_img = height - 1 - cell.y;
        img.put_pixel(cell.x, y_img, display_color(value));
    }

    img
}

/// Write [`grid_to_image`] to a PNG file.
pub fn save_png(map: &GridMap, path: impl AsRef<Path>) -> Result<(), GridError> {
    grid_to_image(map).save(path.as_ref())?;
    Ok(())
}

fn display_color(value: i8) -> Rgb<u8> {
    match value {
        UNKNOWN => Rgb([205, 205, 205]),
        FREE => Rgb([254, 254, 254]),
        OCCUPIED => Rgb([0, 0, 0]),
        MARKER => Rgb([220, 30, 30]),
        _ => Rgb([255, 0, 255]),
    }
}
