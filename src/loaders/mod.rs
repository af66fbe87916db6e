pub mod raster;
pub mod scene;

pub use raster::{RasterThresholds, image_to_local_raster, load_local_raster};
pub use scene::{RasterSource, Scene, VisibilitySource, load_scene};
