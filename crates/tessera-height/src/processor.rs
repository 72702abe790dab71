//! Transfers a height raster onto the vertex grid.

use tracing::debug;

use tessera_grid::TileGrid;

use crate::source::HeightSource;

/// Samples `source` at normalized coordinates `(u, v)` and scales the result.
///
/// Maps to the nearest pixel: `round(u·(w-1))`, `round(v·(h-1))`, clamped to
/// the raster bounds. `u`/`v` outside `[0, 1]` therefore clamp to the border
/// pixels.
pub fn height_at<S: HeightSource + ?Sized>(source: &S, u: f32, v: f32, height_scale: f32) -> f32 {
    let max_px = (source.width() - 1) as f32;
    let max_py = (source.height() - 1) as f32;
    let px = (u * max_px).round().clamp(0.0, max_px) as u32;
    let py = (v * max_py).round().clamp(0.0, max_py) as u32;
    source.sample(px, py) * height_scale
}

/// Writes `source`, scaled by `height_scale`, into every vertex height of
/// `grid`. Returns the number of vertices written.
///
/// Each vertex `(x, y)` samples at `u = x/(width-1)`, `v = y/(height-1)`;
/// a degenerate single-vertex axis samples at `u = 0`. Other vertex
/// attributes (biome, road, building) are left untouched.
pub fn apply_height_source<S: HeightSource + ?Sized>(
    source: &S,
    grid: &mut TileGrid,
    height_scale: f32,
) -> usize {
    let (w, h) = (grid.width(), grid.height());
    let mut written = 0;
    for y in 0..h {
        let v = if h > 1 { y as f32 / (h - 1) as f32 } else { 0.0 };
        for x in 0..w {
            let u = if w > 1 { x as f32 / (w - 1) as f32 } else { 0.0 };
            if let Some(p) = grid.point_mut(x as i32, y as i32) {
                p.height = height_at(source, u, v, height_scale);
                written += 1;
            }
        }
    }
    debug!(written, height_scale, "applied height raster to grid");
    written
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
