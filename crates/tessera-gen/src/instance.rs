//! Placed tile instances.

use glam::Vec3;

use crate::catalog::TileModelId;

/// Which resolver layer placed an instance.
///
/// Listed in priority order: during layered generation the first layer that
/// produces a model wins the cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlacementLayer {
    Building,
    Road,
    BiomeTransition,
    Slope,
    Pattern,
}

impl PlacementLayer {
    /// Number of layers.
    pub const COUNT: usize = 5;

    /// Stable index, in priority order.
    pub fn index(self) -> usize {
        match self {
            PlacementLayer::Building => 0,
            PlacementLayer::Road => 1,
            PlacementLayer::BiomeTransition => 2,
            PlacementLayer::Slope => 3,
            PlacementLayer::Pattern => 4,
        }
    }
}

/// A visual tile placed at a cell.
///
/// Instances are plain data exclusively owned by the generator's instance
/// list; the consuming UI only ever sees a read-only slice of them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileInstance {
    /// The catalog model to display.
    pub model: TileModelId,
    /// World-space placement, at the cell center.
    pub position: Vec3,
    /// The cell this instance occupies.
    pub cell: (i32, i32),
    /// The resolver layer that produced it.
    pub layer: PlacementLayer,
}
