//! Slope classification from a cell's corner heights.

use serde::{Deserialize, Serialize};

use tessera_grid::TileGrid;

/// Slope category of a cell, from its corner height spread.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlopeClass {
    /// Height spread within the flat threshold.
    Flat,
    /// Mild spread; walkable incline.
    Gentle,
    /// Large spread; stairs/ramp territory.
    Steep,
    /// Spread beyond the steep threshold.
    Cliff,
}

impl SlopeClass {
    /// Number of categories.
    pub const COUNT: usize = 4;

    /// Stable index for catalog lookup.
    pub fn index(self) -> usize {
        match self {
            SlopeClass::Flat => 0,
            SlopeClass::Gentle => 1,
            SlopeClass::Steep => 2,
            SlopeClass::Cliff => 3,
        }
    }
}

/// Height-spread thresholds separating the slope categories, in world units.
///
/// A cell whose corner spread is `<= flat` is [`SlopeClass::Flat`],
/// `<= gentle` is Gentle, `<= steep` is Steep, anything larger is Cliff.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlopeThresholds {
    pub flat: f32,
    pub gentle: f32,
    pub steep: f32,
}

impl Default for SlopeThresholds {
    fn default() -> Self {
        Self {
            flat: 0.1,
            gentle: 0.5,
            steep: 1.5,
        }
    }
}

/// Buckets the spread of four corner heights into a [`SlopeClass`].
pub fn classify_slope(heights: [f32; 4], thresholds: &SlopeThresholds) -> SlopeClass {
    let mut min = heights[0];
    let mut max = heights[0];
    for &h in &heights[1..] {
        min = min.min(h);
        max = max.max(h);
    }
    let delta = max - min;
    if delta <= thresholds.flat {
        SlopeClass::Flat
    } else if delta <= thresholds.gentle {
        SlopeClass::Gentle
    } else if delta <= thresholds.steep {
        SlopeClass::Steep
    } else {
        SlopeClass::Cliff
    }
}

/// Corner heights of cell `(x, y)` in TL, TR, BR, BL order, or `None` for an
/// invalid cell.
pub fn cell_corner_heights(grid: &TileGrid, x: i32, y: i32) -> Option<[f32; 4]> {
    if !grid.is_valid_cell(x, y) {
        return None;
    }
    Some([
        grid.point(x, y + 1)?.height,
        grid.point(x + 1, y + 1)?.height,
        grid.point(x + 1, y)?.height,
        grid.point(x, y)?.height,
    ])
}

/// Slope category of cell `(x, y)`. Invalid cells classify as Flat.
pub fn cell_slope(grid: &TileGrid, x: i32, y: i32, thresholds: &SlopeThresholds) -> SlopeClass {
    match cell_corner_heights(grid, x, y) {
        Some(heights) => classify_slope(heights, thresholds),
        None => SlopeClass::Flat,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_heights_always_flat() {
        let t = SlopeThresholds::default();
        for h in [0.0, 0.05, 1.0, 100.0, -40.0] {
            assert_eq!(
                classify_slope([h; 4], &t),
                SlopeClass::Flat,
                "uniform height {h} must be flat"
            );
        }
    }

    #[test]
    fn test_threshold_buckets() {
        let t = SlopeThresholds::default();
        assert_eq!(classify_slope([0.0, 0.1, 0.0, 0.05], &t), SlopeClass::Flat);
        assert_eq!(classify_slope([0.0, 0.3, 0.0, 0.0], &t), SlopeClass::Gentle);
        assert_eq!(classify_slope([0.0, 0.5, 0.2, 0.0], &t), SlopeClass::Gentle);
        assert_eq!(classify_slope([0.0, 1.2, 0.0, 0.0], &t), SlopeClass::Steep);
        assert_eq!(classify_slope([0.0, 1.5, 0.7, 0.0], &t), SlopeClass::Steep);
        assert_eq!(classify_slope([0.0, 2.0, 0.0, 0.0], &t), SlopeClass::Cliff);
    }

    #[test]
    fn test_spread_ignores_sign() {
        let t = SlopeThresholds::default();
        // Spread is max - min regardless of where zero sits.
        assert_eq!(
            classify_slope([-1.0, -2.0, -1.5, -1.0], &t),
            SlopeClass::Steep
        );
    }

    #[test]
    fn test_custom_thresholds() {
        let t = SlopeThresholds {
            flat: 1.0,
            gentle: 2.0,
            steep: 3.0,
        };
        assert_eq!(classify_slope([0.0, 0.9, 0.0, 0.0], &t), SlopeClass::Flat);
        assert_eq!(classify_slope([0.0, 3.5, 0.0, 0.0], &t), SlopeClass::Cliff);
    }

    #[test]
    fn test_cell_slope_reads_corners() {
        let mut grid = TileGrid::new(4, 4, 1.0);
        grid.point_mut(1, 1).unwrap().height = 0.0; // BL
        grid.point_mut(2, 1).unwrap().height = 0.4; // BR
        grid.point_mut(1, 2).unwrap().height = 0.2; // TL
        grid.point_mut(2, 2).unwrap().height = 0.3; // TR
        let t = SlopeThresholds::default();
        assert_eq!(cell_slope(&grid, 1, 1, &t), SlopeClass::Gentle);

        assert_eq!(
            cell_corner_heights(&grid, 1, 1),
            Some([0.2, 0.3, 0.4, 0.0])
        );
    }

    #[test]
    fn test_invalid_cell_is_flat() {
        let grid = TileGrid::new(4, 4, 1.0);
        let t = SlopeThresholds::default();
        assert_eq!(cell_slope(&grid, 3, 3, &t), SlopeClass::Flat);
        assert_eq!(cell_slope(&grid, -1, 0, &t), SlopeClass::Flat);
        assert!(cell_corner_heights(&grid, 3, 0).is_none());
    }
}
