//! Grayscale height raster sources.

use std::path::Path;

use image::GrayImage;

/// A 2D grayscale raster sampled by the height processor.
///
/// Implementations return normalized values in `[0.0, 1.0]`. Pixel
/// coordinates passed to [`sample`](Self::sample) are always in range; the
/// processor clamps before sampling.
pub trait HeightSource {
    /// Raster width in pixels. At least 1.
    fn width(&self) -> u32;

    /// Raster height in pixels. At least 1.
    fn height(&self) -> u32;

    /// Normalized grayscale value at pixel `(px, py)`.
    fn sample(&self, px: u32, py: u32) -> f32;
}

/// Errors that can occur when loading a height raster.
#[derive(Debug, thiserror::Error)]
pub enum HeightSourceError {
    /// Failed to open or decode the image file.
    #[error("failed to load height raster: {0}")]
    Load(#[from] image::ImageError),

    /// The decoded image has a zero dimension.
    #[error("height raster has zero dimension ({width}x{height})")]
    EmptyRaster { width: u32, height: u32 },
}

/// A [`HeightSource`] backed by an 8-bit luma image.
pub struct RasterHeightSource {
    pixels: GrayImage,
}

impl RasterHeightSource {
    /// Loads a raster from a PNG or JPEG file, converting to 8-bit luma.
    pub fn from_path(path: &Path) -> Result<Self, HeightSourceError> {
        let pixels = image::open(path)?.to_luma8();
        Self::from_image(pixels)
    }

    /// Wraps an already-decoded luma image.
    pub fn from_image(pixels: GrayImage) -> Result<Self, HeightSourceError> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(HeightSourceError::EmptyRaster {
                width: pixels.width(),
                height: pixels.height(),
            });
        }
        Ok(Self { pixels })
    }

    /// A uniform raster, useful for tests and calibration.
    pub fn uniform(width: u32, height: u32, value: f32) -> Result<Self, HeightSourceError> {
        let level = (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::from_image(GrayImage::from_pixel(width, height, image::Luma([level])))
    }
}

impl HeightSource for RasterHeightSource {
    fn width(&self) -> u32 {
        self.pixels.width()
    }

    fn height(&self) -> u32 {
        self.pixels.height()
    }

    fn sample(&self, px: u32, py: u32) -> f32 {
        self.pixels.get_pixel(px, py).0[0] as f32 / 255.0
    }
}
