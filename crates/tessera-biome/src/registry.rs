//! Name-based biome registry.

use hashbrown::HashMap;

use crate::BiomeId;

/// Errors that can occur when registering biomes.
#[derive(Debug, thiserror::Error)]
pub enum BiomeRegistryError {
    /// A biome with this name is already registered.
    #[error("duplicate biome name: {0}")]
    DuplicateName(String),
}

/// Maps biome names to sequential [`BiomeId`] values.
///
/// Ids are assigned in registration order, so a registry seeded with
/// [`with_core_biomes`](Self::with_core_biomes) lines up with the well-known
/// id constants on [`BiomeId`].
pub struct BiomeRegistry {
    names: Vec<String>,
    name_to_id: HashMap<String, BiomeId>,
}

impl BiomeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            names: Vec::new(),
            name_to_id: HashMap::new(),
        }
    }

    /// Creates a registry pre-seeded with water, sand, grass and mountain at
    /// ids 0 through 3.
    pub fn with_core_biomes() -> Self {
        let mut reg = Self::new();
        for name in ["water", "sand", "grass", "mountain"] {
            reg.register(name).expect("core biome names are distinct");
        }
        reg
    }

    /// Registers a biome name, returning its assigned [`BiomeId`].
    ///
    /// # Errors
    ///
    /// Returns [`BiomeRegistryError::DuplicateName`] if the name exists.
    pub fn register(&mut self, name: &str) -> Result<BiomeId, BiomeRegistryError> {
        if self.name_to_id.contains_key(name) {
            return Err(BiomeRegistryError::DuplicateName(name.to_string()));
        }
        let id = BiomeId(self.names.len() as u32);
        self.name_to_id.insert(name.to_string(), id);
        self.names.push(name.to_string());
        Ok(id)
    }

    /// The name registered for `id`, if any.
    pub fn name(&self, id: BiomeId) -> Option<&str> {
        self.names.get(id.0 as usize).map(String::as_str)
    }

    /// Looks up a biome id by name.
    pub fn lookup(&self, name: &str) -> Option<BiomeId> {
        self.name_to_id.get(name).copied()
    }

    /// Number of registered biomes.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if no biomes are registered.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for BiomeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
