//! Per-vertex attribute record.

use serde::{Deserialize, Serialize};

/// Attributes stored at a single grid vertex.
///
/// A default (all-zero) point is empty terrain: no height, no biome
/// assignment, no road, no building.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    /// Terrain height in world units.
    pub height: f32,
    /// Biome identifier. 0 is water; see `tessera-biome` for the well-known ids.
    pub biome_id: u32,
    /// Road network identifier, 0 = no road.
    pub road_id: u32,
    /// Building footprint identifier, 0 = no building.
    pub building_id: u32,
}

impl GridPoint {
    /// A vertex counts as filled when it has positive height or carries a
    /// building. Occupancy is derived, never stored separately.
    pub fn is_filled(&self) -> bool {
        self.height > 0.0 || self.building_id > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_point_is_empty() {
        let p = GridPoint::default();
        assert!(!p.is_filled());
        assert_eq!(p.height, 0.0);
        assert_eq!(p.biome_id, 0);
    }

    #[test]
    fn test_height_fills_vertex() {
        let p = GridPoint {
            height: 0.25,
            ..Default::default()
        };
        assert!(p.is_filled());
    }

    #[test]
    fn test_building_fills_vertex_without_height() {
        let p = GridPoint {
            building_id: 7,
            ..Default::default()
        };
        assert!(p.is_filled());
    }

    #[test]
    fn test_negative_height_is_not_filled() {
        let p = GridPoint {
            height: -3.0,
            ..Default::default()
        };
        assert!(!p.is_filled());
    }
}
