//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level generator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Grid dimensions and cell size.
    pub grid: GridSettings,
    /// Height raster input.
    pub heightmap: HeightmapSettings,
    /// Curve painting brush.
    pub brush: BrushSettings,
    /// Generation pass behavior.
    pub generator: GeneratorSettings,
    /// Debug/development settings.
    pub debug: DebugSettings,
}

/// Grid dimensions and scale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GridSettings {
    /// Vertex count along X.
    pub width: u32,
    /// Vertex count along Y.
    pub height: u32,
    /// World units per grid step.
    pub cell_size: f32,
}

/// Height raster input.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HeightmapSettings {
    /// Path to a grayscale PNG/JPEG. `None` skips height processing.
    pub path: Option<PathBuf>,
    /// Multiplier applied to normalized raster values.
    pub height_scale: f32,
}

/// Brush parameters for curve painting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BrushSettings {
    /// World-space brush radius.
    pub radius: f32,
    /// Arc-length distance between curve samples.
    pub sampling_interval: f32,
    /// Occupancy value painted along curves.
    pub fill: bool,
}

/// Generation pass behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Dispose previous instances before a new pass.
    pub clear_before_generate: bool,
    /// Re-run generation after painting curves.
    pub regenerate_after_paint: bool,
    /// Use the layered (building/road/biome/slope) resolution pass.
    pub layered: bool,
    /// Slope classification thresholds.
    pub slope: SlopeSettings,
}

/// Height-spread thresholds for slope classification, in world units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SlopeSettings {
    /// Spread at or below this is flat.
    pub flat_max: f32,
    /// Spread at or below this is a gentle slope.
    pub gentle_max: f32,
    /// Spread at or below this is steep; anything larger is a cliff.
    pub steep_max: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugSettings {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Directory for debug visualization PNGs. `None` disables viz output.
    pub viz_dir: Option<PathBuf>,
}

// --- Default implementations ---

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            width: 64,
            height: 64,
            cell_size: 1.0,
        }
    }
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            radius: 1.5,
            sampling_interval: 0.1,
            fill: true,
        }
    }
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            clear_before_generate: true,
            regenerate_after_paint: false,
            layered: true,
            slope: SlopeSettings::default(),
        }
    }
}

impl Default for SlopeSettings {
    fn default() -> Self {
        Self {
            flat_max: 0.1,
            gentle_max: 0.5,
            steep_max: 1.5,
        }
    }
}

impl Default for DebugSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            viz_dir: None,
        }
    }
}

// --- Load / Save / Reload ---

impl GeneratorConfig {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: GeneratorConfig =
                ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = GeneratorConfig::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: GeneratorConfig =
            ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
