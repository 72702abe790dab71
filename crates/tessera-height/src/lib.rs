//! Height raster sampling and slope classification.
//!
//! Transfers an external grayscale height raster onto the vertex grid via
//! normalized-UV nearest-pixel sampling, and classifies a cell's height
//! variance into one of four slope categories.

mod processor;
mod slope;
mod source;

pub use processor::{apply_height_source, height_at};
pub use slope::{SlopeClass, SlopeThresholds, cell_corner_heights, cell_slope, classify_slope};
pub use source::{HeightSource, HeightSourceError, RasterHeightSource};
