//! Debug visualization: 2D image rendering of grid classification data.
//!
//! Renders occupancy, pattern indices and slope classes to flat RGBA images
//! and saves them as PNGs, for visually diagnosing a generation pass.

use std::path::Path;

use tessera_grid::TileGrid;
use tessera_height::{SlopeClass, SlopeThresholds, cell_slope};
use tessera_march::cell_pattern;

/// Errors that can occur when saving a debug image.
#[derive(Debug, thiserror::Error)]
pub enum VizError {
    /// Failed to encode or write the image file.
    #[error("failed to write debug image: {0}")]
    Write(#[from] image::ImageError),
}

/// A 2D debug image stored as row-major RGBA pixels.
#[derive(Clone, Debug)]
pub struct DebugImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Pixel data in row-major RGBA format. Length = `width * height * 4`.
    pub pixels: Vec<u8>,
}

impl DebugImage {
    /// Create a new black (all-zero) image with the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width * height * 4) as usize],
        }
    }

    /// Set a single pixel's RGBA value.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn set_pixel(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8, a: u8) {
        let idx = ((y * self.width + x) * 4) as usize;
        self.pixels[idx] = r;
        self.pixels[idx + 1] = g;
        self.pixels[idx + 2] = b;
        self.pixels[idx + 3] = a;
    }

    /// Get a pixel's RGBA value.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn get_pixel(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        let idx = ((y * self.width + x) * 4) as usize;
        (
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        )
    }

    /// Save as a PNG file.
    pub fn save_png(&self, path: &Path) -> Result<(), VizError> {
        image::save_buffer(
            path,
            &self.pixels,
            self.width,
            self.height,
            image::ExtendedColorType::Rgba8,
        )?;
        Ok(())
    }
}

/// Render vertex occupancy: filled vertices white, empty black.
///
/// One pixel per vertex, with image rows top-down while grid rows run
/// bottom-up, so the image matches the world orientation.
pub fn render_occupancy(grid: &TileGrid) -> DebugImage {
    let (w, h) = (grid.width(), grid.height());
    let mut img = DebugImage::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let level = if grid.vertex(x as i32, y as i32) { 255 } else { 0 };
            img.set_pixel(x, h - 1 - y, level, level, level, 255);
        }
    }
    img
}

/// Render cell pattern indices as grayscale, one pixel per cell.
///
/// Index 0 maps to black and 15 to near-white (17 gray steps apart), so
/// bands of equal pattern read as flat regions.
pub fn render_pattern_map(grid: &TileGrid) -> DebugImage {
    let (w, h) = (grid.width().saturating_sub(1), grid.height().saturating_sub(1));
    let mut img = DebugImage::new(w.max(1), h.max(1));
    for y in 0..h {
        for x in 0..w {
            let level = cell_pattern(grid, x as i32, y as i32)
                .map(|p| p.index() * 17)
                .unwrap_or(0);
            img.set_pixel(x, h - 1 - y, level, level, level, 255);
        }
    }
    img
}

/// Color for a slope class: green, yellow, orange, red from flat to cliff.
pub fn slope_color(slope: SlopeClass) -> (u8, u8, u8) {
    match slope {
        SlopeClass::Flat => (60, 160, 60),
        SlopeClass::Gentle => (210, 200, 60),
        SlopeClass::Steep => (220, 140, 40),
        SlopeClass::Cliff => (200, 40, 40),
    }
}

/// Render cell slope classes, one pixel per cell.
pub fn render_slope_map(grid: &TileGrid, thresholds: &SlopeThresholds) -> DebugImage {
    let (w, h) = (grid.width().saturating_sub(1), grid.height().saturating_sub(1));
    let mut img = DebugImage::new(w.max(1), h.max(1));
    for y in 0..h {
        for x in 0..w {
            let (r, g, b) = slope_color(cell_slope(grid, x as i32, y as i32, thresholds));
            img.set_pixel(x, h - 1 - y, r, g, b, 255);
        }
    }
    img
}
