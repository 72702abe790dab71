//! Content hash over the height grid, for golden-value regression checks.

use tessera_grid::TileGrid;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Height values are quantized to `round(height * 256)` sixteen-bit steps
/// before hashing, so bit-identical reruns hash identically while sub-step
/// float noise does not.
const QUANT_STEPS_PER_UNIT: f32 = 256.0;

/// FNV-1a 64-bit hash over the grid's quantized heights.
///
/// Vertices are visited row-major, each contributing its quantized height as
/// two little-endian bytes. Reruns with identical configuration must produce
/// the same fingerprint; a changed fingerprint means the height pass changed.
pub fn height_fingerprint(grid: &TileGrid) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            let height = grid.point(x, y).map(|p| p.height).unwrap_or(0.0);
            let quantized = (height * QUANT_STEPS_PER_UNIT).round().clamp(0.0, 65535.0) as u16;
            for byte in quantized.to_le_bytes() {
                hash ^= byte as u64;
                hash = hash.wrapping_mul(FNV_PRIME);
            }
        }
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_golden_value_all_zero() {
        let grid = TileGrid::new(10, 10, 1.0);
        assert_eq!(height_fingerprint(&grid), 0x37027190f725c8c5);
    }

    #[test]
    fn test_golden_value_uniform_ones() {
        let mut grid = TileGrid::new(3, 3, 1.0);
        for y in 0..3 {
            for x in 0..3 {
                grid.point_mut(x, y).unwrap().height = 1.0;
            }
        }
        assert_eq!(height_fingerprint(&grid), 0x19a13066a426459a);
    }

    #[test]
    fn test_rerun_is_stable() {
        let mut grid = TileGrid::new(8, 8, 1.0);
        for y in 0..8 {
            for x in 0..8 {
                grid.point_mut(x, y).unwrap().height = (x * 3 + y) as f32 * 0.25;
            }
        }
        assert_eq!(height_fingerprint(&grid), height_fingerprint(&grid));
    }

    #[test]
    fn test_single_vertex_change_changes_hash() {
        let mut grid = TileGrid::new(8, 8, 1.0);
        let before = height_fingerprint(&grid);
        grid.point_mut(4, 4).unwrap().height = 0.5;
        assert_ne!(height_fingerprint(&grid), before);
    }

    #[test]
    fn test_sub_quantum_noise_is_ignored() {
        let mut grid = TileGrid::new(4, 4, 1.0);
        grid.point_mut(1, 1).unwrap().height = 1.0;
        let a = height_fingerprint(&grid);
        // A thousandth of a world unit is below the 1/256 quantization step.
        grid.point_mut(1, 1).unwrap().height = 1.001;
        assert_eq!(height_fingerprint(&grid), a);
    }

    #[test]
    fn test_negative_heights_clamp_to_zero_step() {
        let mut zeroed = TileGrid::new(4, 4, 1.0);
        let baseline = height_fingerprint(&zeroed);
        zeroed.point_mut(0, 0).unwrap().height = -5.0;
        assert_eq!(height_fingerprint(&zeroed), baseline);
    }
}
