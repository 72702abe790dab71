//! Boundary detection between a vertex and its axis neighbors.

use tessera_grid::TileGrid;

use crate::BiomeId;

/// Classification of the biome boundary at a vertex.
///
/// `None` means the vertex sits inside a single biome. `Other` is the
/// catch-all for id pairs without a dedicated category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    None,
    SeaToLand,
    LandToSea,
    LandToMountain,
    MountainToLand,
    SandToGrass,
    GrassToSand,
    Other,
}

impl TransitionKind {
    /// Number of categories, including `None` and `Other`.
    pub const COUNT: usize = 8;

    /// Stable index for catalog lookup.
    pub fn index(self) -> usize {
        match self {
            TransitionKind::None => 0,
            TransitionKind::SeaToLand => 1,
            TransitionKind::LandToSea => 2,
            TransitionKind::LandToMountain => 3,
            TransitionKind::MountainToLand => 4,
            TransitionKind::SandToGrass => 5,
            TransitionKind::GrassToSand => 6,
            TransitionKind::Other => 7,
        }
    }
}

/// Classifies the boundary from `center` toward `neighbor`.
///
/// The table covers the water/land, land/mountain and sand/grass pairs in
/// both directions; sand and grass both count as land. Every remaining
/// mismatched pair is `Other`.
pub fn transition_between(center: BiomeId, neighbor: BiomeId) -> TransitionKind {
    use BiomeId as B;
    if center == neighbor {
        return TransitionKind::None;
    }
    match (center, neighbor) {
        (B::WATER, B::SAND | B::GRASS) => TransitionKind::SeaToLand,
        (B::SAND | B::GRASS, B::WATER) => TransitionKind::LandToSea,
        (B::SAND, B::GRASS) => TransitionKind::SandToGrass,
        (B::GRASS, B::SAND) => TransitionKind::GrassToSand,
        (B::SAND | B::GRASS, B::MOUNTAIN) => TransitionKind::LandToMountain,
        (B::MOUNTAIN, B::SAND | B::GRASS) => TransitionKind::MountainToLand,
        _ => TransitionKind::Other,
    }
}

/// Classifies the dominant transition at vertex `(x, y)` of `grid`.
///
/// The four axis neighbors are checked in fixed priority order North
/// `(x, y+1)`, East `(x+1, y)`, South `(x, y-1)`, West `(x-1, y)`; the first
/// mismatching neighbor decides. A neighbor outside the grid is treated as
/// matching the center, so the map edge never reports a transition. An
/// out-of-range center vertex reports `None`.
pub fn vertex_transition(grid: &TileGrid, x: i32, y: i32) -> TransitionKind {
    let Some(center) = grid.point(x, y) else {
        return TransitionKind::None;
    };
    let center = BiomeId(center.biome_id);

    let neighbors = [(x, y + 1), (x + 1, y), (x, y - 1), (x - 1, y)];
    for (nx, ny) in neighbors {
        let neighbor = grid
            .point(nx, ny)
            .map(|p| BiomeId(p.biome_id))
            .unwrap_or(center);
        let kind = transition_between(center, neighbor);
        if kind != TransitionKind::None {
            return kind;
        }
    }
    TransitionKind::None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
