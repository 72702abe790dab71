//! Configuration for the tile generator: serde structs with sensible
//! defaults, RON persistence, and CLI overrides.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    BrushSettings, DebugSettings, GeneratorConfig, GeneratorSettings, GridSettings,
    HeightmapSettings, SlopeSettings,
};
pub use error::ConfigError;

use std::path::PathBuf;

/// Default configuration directory: the platform config dir plus `tessera`,
/// falling back to the working directory.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("tessera"))
        .unwrap_or_else(|| PathBuf::from("."))
}
