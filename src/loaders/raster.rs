//! Image to local raster conversion.
//!
//! Global lightness thresholds classify each pixel; fully transparent pixels
//! are unknown.

use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use serde::Deserialize;

use crate::fusion::LocalRaster;
use crate::types::{
    DEFAULT_FREE_THRESH, DEFAULT_OCCUPIED_THRESH, FREE, GridError, OCCUPIED, UNKNOWN,
};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RasterThresholds {
    /// Lightness at or below which a pixel is occupied.
    #[serde(default = "default_occupied_thresh")]
    pub occupied_thresh: f32,
    /// Lightness at or above which a pixel is free.
    #[serde(default = "default_free_thresh")]
    pub free_thresh: f32,
}

impl Default for RasterThresholds {
    fn default() -> Self {
        Self {
            occupied_thresh: DEFAULT_OCCUPIED_THRESH,
            free_thresh: DEFAULT_FREE_THRESH,
        }
    }
}

fn default_occupied_thresh() -> f32 {
    DEFAULT_OCCUPIED_THRESH
}

fn default_free_thresh() -> f32 {
    DEFAULT_FREE_THRESH
}

impl RasterThresholds {
    fn validate(&self) -> Result<(), GridError> {
        let in_range = |v: f32| (0.0..=1.0).contains(&v);
        if !in_range(self.occupied_thresh) || !in_range(self.free_thresh) {
            return Err(GridError::InvalidConfig(
                "thresholds must be in the range [0.0, 1.0]".to_string(),
            ));
        }
        if self.occupied_thresh >= self.free_thresh {
            return Err(GridError::InvalidConfig(
                "occupied_thresh must be below free_thresh".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load an image file and classify it into a [`LocalRaster`].
///
/// With `size = Some((width, height))` the image is resized first.
pub fn load_local_raster(
    path: impl AsRef<Path>,
    size: Option<(u32, u32)>,
    thresholds: RasterThresholds,
) -> Result<LocalRaster, GridError> {
    let image = image::open(path.as_ref())?;
    image_to_local_raster(&image, size, thresholds)
}

/// Classify an in-memory image. Row 0 of the raster is the image top.
pub fn image_to_local_raster(
    image: &DynamicImage,
    size: Option<(u32, u32)>,
    thresholds: RasterThresholds,
) -> Result<LocalRaster, GridError> {
    thresholds.validate()?;

    let resized;
    let image = match size {
        Some((w, h)) if (w, h) != image.dimensions() => {
            if w == 0 || h == 0 {
                return Err(GridError::InvalidRaster(format!(
                    "cannot resize image to {w}x{h}"
                )));
            }
            resized = image.resize_exact(w, h, FilterType::Triangle);
            &resized
        }
        _ => image,
    };

    let (width, height) = image.dimensions();
    let rgba = image.to_rgba8();
    let mut data = vec![UNKNOWN; (width as usize) * (height as usize)];

    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let lightness = (r as f32 + g as f32 + b as f32) / (3.0 * 255.0);

        let value = if a == 0 {
            UNKNOWN
        } else if lightness <= thresholds.occupied_thresh {
            OCCUPIED
        } else if lightness >= thresholds.free_thresh {
            FREE
        } else {
            UNKNOWN
        };

        let idx = (y as usize) * (width as usize) + (x as usize);
        data[idx] = value;
    }

    LocalRaster::new(width, height, data)
}

#[cfg(test)]
mod tests {
    use glam::IVec2;
    use image::{Rgba, RgbaImage};

    use super::*;

    fn sample_image() -> DynamicImage {
        // Row 0: black, white. Row 1: mid-gray, transparent.
        let mut img = RgbaImage::new(2, 2);
        img.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([255, 255, 255, 255]));
        img.put_pixel(0, 1, Rgba([128, 128, 128, 255]));
        img.put_pixel(1, 1, Rgba([0, 0, 0, 0]));
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn classifies_by_lightness() {
        let raster =
            image_to_local_raster(&sample_image(), None, RasterThresholds::default()).unwrap();
        assert_eq!(raster.get(IVec2::new(0, 0)), Some(OCCUPIED));
        assert_eq!(raster.get(IVec2::new(1, 0)), Some(FREE));
        assert_eq!(raster.get(IVec2::new(0, 1)), Some(UNKNOWN));
        assert_eq!(raster.get(IVec2::new(1, 1)), Some(UNKNOWN));
    }

    #[test]
    fn resizes_to_requested_shape() {
        let raster =
            image_to_local_raster(&sample_image(), Some((4, 6)), RasterThresholds::default())
                .unwrap();
        assert_eq!((raster.width(), raster.height()), (4, 6));
    }

    #[test]
    fn rejects_inverted_thresholds() {
        let thresholds = RasterThresholds {
            occupied_thresh: 0.8,
            free_thresh: 0.2,
        };
        assert!(image_to_local_raster(&sample_image(), None, thresholds).is_err());
        assert!(image_to_local_raster(&sample_image(), Some((0, 3)), Default::default()).is_err());
    }
}
