//! # CardTray
//!
//! Generates the flat pieces of a laser-cut card tray: a row of card decks
//! separated by finger-jointed dividers, with a bottom, a back wall and
//! front stubs that all slot together without glue.
//!
//! ## Architecture
//!
//! CardTray is organized as a workspace with multiple crates:
//!
//! 1. **cardtray-core** - Drafting cursor, joint primitives, panel generators, exporters
//! 2. **cardtray-settings** - Configuration files and validation
//! 3. **cardtray** - Command line binary that integrates both crates

pub mod cli;

pub use cardtray_core::{
    CardTrayMaker, OutputFormat, Panel, PanelKind, TabStrategy, TrayError, TrayLayout,
    TrayParameters,
};
pub use cardtray_settings::{Config, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Version string shown by `--version`
pub const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")");

/// Initialize logging
///
/// Logs go to stderr so panel sizes on stdout stay clean. `RUST_LOG`
/// overrides the level picked from `verbosity` (0 = warn, 1 = info,
/// 2 = debug, 3+ = trace).
pub fn init_logging(verbosity: u8, json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));

    let result = if json {
        let fmt_layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_line_number(verbosity >= 2);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}
