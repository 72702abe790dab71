//! Arc-length sampling and disc stamping.

use tracing::{debug, warn};

use tessera_grid::TileGrid;

use crate::curve::Curve;

/// Fallback arc-length step when the configured interval is unusable.
pub const DEFAULT_SAMPLING_INTERVAL: f32 = 0.1;

/// Brush parameters for a rasterization pass.
#[derive(Clone, Copy, Debug)]
pub struct BrushOptions {
    /// World-space brush reach around each sampled point.
    pub radius: f32,
    /// Arc-length distance between samples, in world units.
    pub sampling_interval: f32,
    /// Occupancy value stamped into the grid.
    pub fill: bool,
}

/// Counters reported by a rasterization pass, for operator feedback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RasterStats {
    /// Curve samples taken, including the explicit endpoint pass.
    pub samples: usize,
    /// Vertex writes across all disc stamps (overlapping discs count twice).
    pub stamped: usize,
}

/// Stamps a filled disc around vertex `(cx, cy)`.
///
/// Every vertex whose world position lies within `radius` of the center
/// vertex's world position is set to `fill` through the occupancy shim.
/// Candidates outside the grid are skipped, not clamped — a brush hanging
/// over the boundary paints only its inside part. Returns the number of
/// vertices written.
pub fn stamp_disc(grid: &mut TileGrid, cx: i32, cy: i32, radius: f32, fill: bool) -> usize {
    let center = grid.grid_to_world(cx, cy);
    let reach = (radius / grid.cell_size()).ceil() as i32;
    let mut stamped = 0;
    for y in (cy - reach)..=(cy + reach) {
        for x in (cx - reach)..=(cx + reach) {
            if !grid.in_bounds(x, y) {
                continue;
            }
            if grid.grid_to_world(x, y).distance(center) <= radius {
                grid.set_vertex(x, y, fill);
                stamped += 1;
            }
        }
    }
    stamped
}

/// Paints occupancy along `curve` with a disc brush.
///
/// Walks the arc length from 0 in steps of `sampling_interval`, stamping a
/// disc at the nearest grid vertex of each sampled position. The exact
/// endpoint (`t = 1`) is always stamped once more after the walk, since the
/// accumulated distance can undershoot the true end. A zero-length curve
/// stamps exactly once, at its anchor point.
///
/// Degenerate options are corrected rather than rejected: a non-positive or
/// non-finite radius becomes one cell size, a non-positive or non-finite
/// interval becomes [`DEFAULT_SAMPLING_INTERVAL`], each with a logged
/// warning.
pub fn rasterize_curve<C: Curve + ?Sized>(
    curve: &C,
    grid: &mut TileGrid,
    opts: &BrushOptions,
) -> RasterStats {
    let radius = if opts.radius > 0.0 && opts.radius.is_finite() {
        opts.radius
    } else {
        warn!(
            radius = opts.radius,
            "invalid brush radius, substituting one cell size"
        );
        grid.cell_size()
    };
    let interval = if opts.sampling_interval > 0.0 && opts.sampling_interval.is_finite() {
        opts.sampling_interval
    } else {
        warn!(
            interval = opts.sampling_interval,
            "invalid sampling interval, substituting {DEFAULT_SAMPLING_INTERVAL}"
        );
        DEFAULT_SAMPLING_INTERVAL
    };

    let length = curve.length();
    let mut stats = RasterStats::default();

    if length > 0.0 {
        let mut d = 0.0;
        while d < length {
            let t = (d / length).clamp(0.0, 1.0);
            let (gx, gy) = grid.world_to_grid(curve.position_at(t));
            stats.stamped += stamp_disc(grid, gx, gy, radius, opts.fill);
            stats.samples += 1;
            d += interval;
        }
    }

    // The walk can stop short of the true end; the endpoint always gets one
    // explicit stamp.
    let (gx, gy) = grid.world_to_grid(curve.position_at(1.0));
    stats.stamped += stamp_disc(grid, gx, gy, radius, opts.fill);
    stats.samples += 1;

    debug!(
        samples = stats.samples,
        stamped = stats.stamped,
        length,
        "rasterized curve"
    );
    stats
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
