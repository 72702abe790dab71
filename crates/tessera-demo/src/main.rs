//! Headless demo: builds a small island map end to end.
//!
//! Loads (or creates) the RON config, paints a biome layout and a winding
//! road onto the grid, runs the layered generation pass, and reports the
//! per-layer instance counts plus the height fingerprint.

use clap::Parser;
use glam::Vec3;
use tracing::{info, warn};

use tessera_biome::BiomeId;
use tessera_config::{CliArgs, GeneratorConfig, default_config_dir};
use tessera_gen::{MapGenerator, PlacementLayer, TileCatalog, TileModelRegistry, height_fingerprint, viz};
use tessera_grid::TileGrid;
use tessera_spline::Polyline;

fn main() {
    let args = CliArgs::parse();
    let config_dir = args.config.clone().unwrap_or_else(default_config_dir);

    let mut config = GeneratorConfig::load_or_create(&config_dir).unwrap_or_else(|err| {
        eprintln!("config unavailable ({err}), using defaults");
        GeneratorConfig::default()
    });
    config.apply_cli_overrides(&args);

    tessera_log::init_logging(Some(&config_dir), Some(&config));

    let (registry, catalog) = demo_catalog();
    let mut generator = MapGenerator::new(catalog);
    generator.init_grid(&config);

    if let Some(grid) = generator.grid_mut() {
        paint_demo_biomes(grid);
    }

    // A winding road across the map, painted as filled occupancy.
    let scale = config.grid.width.min(config.grid.height) as f32 * config.grid.cell_size;
    let road = Polyline::new(vec![
        Vec3::new(0.1 * scale, 0.0, 0.2 * scale),
        Vec3::new(0.4 * scale, 0.0, 0.3 * scale),
        Vec3::new(0.5 * scale, 0.0, 0.6 * scale),
        Vec3::new(0.9 * scale, 0.0, 0.8 * scale),
    ]);
    generator.rasterize_curves(&[&road], true);

    let placed = if config.generator.layered {
        generator.generate_layered()
    } else {
        generator.generate()
    };

    let counts = generator.layer_counts();
    info!(
        placed,
        transitions = counts[PlacementLayer::BiomeTransition.index()],
        slopes = counts[PlacementLayer::Slope.index()],
        patterns = counts[PlacementLayer::Pattern.index()],
        "demo map generated"
    );

    for inst in generator.instances().iter().take(5) {
        let name = registry.name(inst.model).unwrap_or("?");
        info!(cell = ?inst.cell, model = name, "sample instance");
    }

    if let Some(grid) = generator.grid() {
        let fingerprint = format!("{:016x}", height_fingerprint(grid));
        info!(
            fill_ratio = grid.fill_ratio(),
            fingerprint = %fingerprint,
            "grid summary"
        );
        if let Some(viz_dir) = &config.debug.viz_dir {
            write_viz(grid, viz_dir, &config);
        }
    }
}

/// Registers one model per pattern plus boundary and slope tiles.
fn demo_catalog() -> (TileModelRegistry, TileCatalog) {
    let mut registry = TileModelRegistry::new();
    let mut catalog = TileCatalog::default();

    for pattern in 0..16u32 {
        // Pattern 0 is deliberately left empty: open water gets no tile.
        if pattern == 0 {
            continue;
        }
        let name = format!("ground_{pattern:02}");
        if let Ok(id) = registry.register(&name) {
            catalog.by_pattern[pattern as usize] = Some(id);
        }
    }

    use tessera_biome::TransitionKind;
    use tessera_height::SlopeClass;
    let mut register = |name: &str| registry.register(name).ok();
    if let Some(id) = register("shore_line") {
        catalog.by_transition[TransitionKind::SeaToLand.index()] = Some(id);
        catalog.by_transition[TransitionKind::LandToSea.index()] = Some(id);
    }
    if let Some(id) = register("boundary_generic") {
        catalog.by_transition[TransitionKind::Other.index()] = Some(id);
    }
    if let Some(id) = register("slope_ramp") {
        catalog.by_slope[SlopeClass::Gentle.index()] = Some(id);
        catalog.by_slope[SlopeClass::Steep.index()] = Some(id);
    }
    if let Some(id) = register("cliff_wall") {
        catalog.by_slope[SlopeClass::Cliff.index()] = Some(id);
    }

    (registry, catalog)
}

/// Concentric biome rings: water at the rim, then sand, grass, and a
/// mountain core.
fn paint_demo_biomes(grid: &mut TileGrid) {
    let (w, h) = (grid.width() as i32, grid.height() as i32);
    let rim = (w.min(h) / 8).max(1);
    for y in 0..h {
        for x in 0..w {
            let edge = x.min(y).min(w - 1 - x).min(h - 1 - y);
            let biome = if edge < rim {
                BiomeId::WATER
            } else if edge < 2 * rim {
                BiomeId::SAND
            } else if edge < 4 * rim {
                BiomeId::GRASS
            } else {
                BiomeId::MOUNTAIN
            };
            if let Some(p) = grid.point_mut(x, y) {
                p.biome_id = biome.0;
            }
        }
    }
}

fn write_viz(grid: &TileGrid, viz_dir: &std::path::Path, config: &GeneratorConfig) {
    if let Err(err) = std::fs::create_dir_all(viz_dir) {
        warn!(%err, "could not create viz directory");
        return;
    }
    let thresholds = tessera_height::SlopeThresholds {
        flat: config.generator.slope.flat_max,
        gentle: config.generator.slope.gentle_max,
        steep: config.generator.slope.steep_max,
    };
    let jobs = [
        ("occupancy.png", viz::render_occupancy(grid)),
        ("patterns.png", viz::render_pattern_map(grid)),
        ("slopes.png", viz::render_slope_map(grid, &thresholds)),
    ];
    for (name, img) in jobs {
        let path = viz_dir.join(name);
        match img.save_png(&path) {
            Ok(()) => info!(path = %path.display(), "wrote debug image"),
            Err(err) => warn!(%err, "failed to write debug image"),
        }
    }
}
