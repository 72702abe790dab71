//! Curve-to-grid rasterization.
//!
//! Walks a curve at fixed arc-length intervals and stamps occupancy into the
//! grid with a world-space brush radius. The [`Curve`] trait keeps the
//! rasterizer independent of any particular spline library: anything that can
//! report its arc length and evaluate a position at a normalized parameter
//! can be painted.

mod curve;
mod raster;

pub use curve::{Curve, Polyline};
pub use raster::{BrushOptions, DEFAULT_SAMPLING_INTERVAL, RasterStats, rasterize_curve, stamp_disc};
