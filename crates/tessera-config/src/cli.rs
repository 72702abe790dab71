//! Command-line argument parsing for the tile generator tools.

use std::path::PathBuf;

use clap::Parser;

use crate::GeneratorConfig;

/// Tessera command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "tessera", about = "Tessera tile generator")]
pub struct CliArgs {
    /// Grid width in vertices.
    #[arg(long)]
    pub width: Option<u32>,

    /// Grid height in vertices.
    #[arg(long)]
    pub height: Option<u32>,

    /// World units per grid step.
    #[arg(long)]
    pub cell_size: Option<f32>,

    /// Path to a grayscale height raster.
    #[arg(long)]
    pub heightmap: Option<PathBuf>,

    /// Height multiplier for the raster.
    #[arg(long)]
    pub height_scale: Option<f32>,

    /// World-space brush radius for curve painting.
    #[arg(long)]
    pub brush_radius: Option<f32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Directory for debug visualization PNGs.
    #[arg(long)]
    pub viz_dir: Option<PathBuf>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl GeneratorConfig {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.grid.width = w;
        }
        if let Some(h) = args.height {
            self.grid.height = h;
        }
        if let Some(cs) = args.cell_size {
            self.grid.cell_size = cs;
        }
        if let Some(ref path) = args.heightmap {
            self.heightmap.path = Some(path.clone());
        }
        if let Some(scale) = args.height_scale {
            self.heightmap.height_scale = scale;
        }
        if let Some(radius) = args.brush_radius {
            self.brush.radius = radius;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(ref dir) = args.viz_dir {
            self.debug.viz_dir = Some(dir.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = GeneratorConfig::default();
        let args = CliArgs {
            width: Some(128),
            brush_radius: Some(2.5),
            log_level: Some("debug".to_string()),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.grid.width, 128);
        assert_eq!(config.brush.radius, 2.5);
        assert_eq!(config.debug.log_level, "debug");
        // Non-overridden fields retain defaults.
        assert_eq!(config.grid.height, 64);
        assert_eq!(config.brush.sampling_interval, 0.1);
    }

    #[test]
    fn test_cli_no_override() {
        let original = GeneratorConfig::default();
        let mut config = GeneratorConfig::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_heightmap_override_sets_path() {
        let mut config = GeneratorConfig::default();
        assert!(config.heightmap.path.is_none());
        let args = CliArgs {
            heightmap: Some(PathBuf::from("hills.png")),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.heightmap.path, Some(PathBuf::from("hills.png")));
    }
}
