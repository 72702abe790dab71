//! Structured logging for the tile generator tools.
//!
//! Console output with module paths and an uptime timer, plus JSON file
//! logging in debug builds for post-mortem analysis. The filter respects
//! `RUST_LOG` and falls back to the config's `debug.log_level` override.

use std::path::Path;

use tessera_config::GeneratorConfig;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when neither `RUST_LOG` nor a config override is present.
const DEFAULT_FILTER: &str = "info";

/// Initialize the tracing subscriber.
///
/// Filter precedence: `RUST_LOG` env var, then the config's
/// `debug.log_level`, then `"info"`. In debug builds, when `log_dir` is
/// given and writable, events are additionally written to
/// `<log_dir>/tessera.log` as JSON lines.
pub fn init_logging(log_dir: Option<&Path>, config: Option<&GeneratorConfig>) {
    let filter_str = config
        .map(|c| c.debug.log_level.as_str())
        .filter(|level| !level.is_empty())
        .unwrap_or(DEFAULT_FILTER);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if cfg!(debug_assertions)
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join("tessera.log"))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

/// Create an `EnvFilter` with the default filter string.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}
