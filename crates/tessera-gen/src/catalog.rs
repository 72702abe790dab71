//! Visual asset catalogs.
//!
//! Assets are opaque handles; the generator never inspects them beyond
//! identity. Catalogs are sparse fixed-size tables — an absent entry means
//! "place nothing", never an error.

use hashbrown::HashMap;

use tessera_biome::TransitionKind;
use tessera_height::SlopeClass;
use tessera_march::CellPattern;

/// Opaque handle to a visual tile asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileModelId(pub u32);

/// Errors that can occur when registering tile models.
#[derive(Debug, thiserror::Error)]
pub enum TileModelRegistryError {
    /// A model with this name is already registered.
    #[error("duplicate tile model name: {0}")]
    DuplicateName(String),
}

/// Maps model names to sequential [`TileModelId`] values.
pub struct TileModelRegistry {
    names: Vec<String>,
    name_to_id: HashMap<String, TileModelId>,
}

impl TileModelRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            names: Vec::new(),
            name_to_id: HashMap::new(),
        }
    }

    /// Registers a model name, returning its assigned [`TileModelId`].
    ///
    /// # Errors
    ///
    /// Returns [`TileModelRegistryError::DuplicateName`] if the name exists.
    pub fn register(&mut self, name: &str) -> Result<TileModelId, TileModelRegistryError> {
        if self.name_to_id.contains_key(name) {
            return Err(TileModelRegistryError::DuplicateName(name.to_string()));
        }
        let id = TileModelId(self.names.len() as u32);
        self.name_to_id.insert(name.to_string(), id);
        self.names.push(name.to_string());
        Ok(id)
    }

    /// The name registered for `id`, if any.
    pub fn name(&self, id: TileModelId) -> Option<&str> {
        self.names.get(id.0 as usize).map(String::as_str)
    }

    /// Looks up a model id by name.
    pub fn lookup(&self, name: &str) -> Option<TileModelId> {
        self.name_to_id.get(name).copied()
    }

    /// Number of registered models.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if no models are registered.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for TileModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The three sparse lookup tables driving placement.
#[derive(Clone, Debug, Default)]
pub struct TileCatalog {
    /// Indexed by the 4-bit marching-squares pattern.
    pub by_pattern: [Option<TileModelId>; CellPattern::COUNT],
    /// Indexed by [`TransitionKind::index`]. The `Other` slot doubles as the
    /// fallback for categories without their own entry.
    pub by_transition: [Option<TileModelId>; TransitionKind::COUNT],
    /// Indexed by [`SlopeClass::index`].
    pub by_slope: [Option<TileModelId>; SlopeClass::COUNT],
}

impl TileCatalog {
    /// Model for a pattern index, if assigned.
    pub fn pattern_model(&self, pattern: CellPattern) -> Option<TileModelId> {
        self.by_pattern[pattern.index() as usize]
    }

    /// Model for a slope class, if assigned.
    pub fn slope_model(&self, slope: SlopeClass) -> Option<TileModelId> {
        self.by_slope[slope.index()]
    }
}

/// Model for a transition category: the category's own slot, else the
/// `Other` slot, else nothing. `None` transitions never map to a model.
pub fn select_boundary_model(kind: TransitionKind, catalog: &TileCatalog) -> Option<TileModelId> {
    if kind == TransitionKind::None {
        return None;
    }
    catalog.by_transition[kind.index()]
        .or(catalog.by_transition[TransitionKind::Other.index()])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_assigns_sequential_ids() {
        let mut reg = TileModelRegistry::new();
        let a = reg.register("floor").unwrap();
        let b = reg.register("wall").unwrap();
        assert_eq!(a, TileModelId(0));
        assert_eq!(b, TileModelId(1));
        assert_eq!(reg.lookup("wall"), Some(b));
        assert_eq!(reg.name(a), Some("floor"));
    }

    #[test]
    fn test_registry_rejects_duplicates() {
        let mut reg = TileModelRegistry::new();
        reg.register("floor").unwrap();
        assert!(matches!(
            reg.register("floor"),
            Err(TileModelRegistryError::DuplicateName(_))
        ));
    }

    #[test]
    fn test_empty_catalog_places_nothing() {
        let catalog = TileCatalog::default();
        assert!(catalog.pattern_model(CellPattern::from_corners(true, true, true, true)).is_none());
        assert!(catalog.slope_model(SlopeClass::Cliff).is_none());
        assert!(select_boundary_model(TransitionKind::SeaToLand, &catalog).is_none());
    }

    #[test]
    fn test_boundary_model_falls_back_to_other() {
        let mut catalog = TileCatalog::default();
        catalog.by_transition[TransitionKind::Other.index()] = Some(TileModelId(7));

        // No dedicated slot: the Other slot answers.
        assert_eq!(
            select_boundary_model(TransitionKind::SeaToLand, &catalog),
            Some(TileModelId(7))
        );

        // A dedicated slot wins over the fallback.
        catalog.by_transition[TransitionKind::SeaToLand.index()] = Some(TileModelId(2));
        assert_eq!(
            select_boundary_model(TransitionKind::SeaToLand, &catalog),
            Some(TileModelId(2))
        );
    }

    #[test]
    fn test_no_transition_never_selects() {
        let mut catalog = TileCatalog::default();
        catalog.by_transition[TransitionKind::Other.index()] = Some(TileModelId(7));
        assert!(select_boundary_model(TransitionKind::None, &catalog).is_none());
    }
}
