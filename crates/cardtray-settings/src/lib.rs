//! CardTray Settings Crate
//!
//! Loads, validates and saves the tray, style, output and laser settings
//! used by the `cardtray` binary.

pub mod config;
pub mod error;

pub use config::{Config, LaserSettings, OutputSettings, StyleSettings, TraySettings};
pub use error::{SettingsError, SettingsResult};
