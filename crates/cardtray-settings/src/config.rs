//! Configuration and settings management for CardTray
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML files; the default file lives in the platform config directory.
//!
//! Configuration is organized into logical sections:
//! - Tray dimensions (cards, decks, material)
//! - Drawing style (stroke colour and width)
//! - Output (directory, file prefix, format)
//! - Laser settings for G-code output

use cardtray_core::{
    GcodeExporter, JsonExporter, OutputFormat, PanelExporter, SvgExporter, TabStrategy,
    TrayParameters,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{SettingsError, SettingsResult};

/// Tray dimensions, in millimetres
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraySettings {
    /// Height of one card
    pub card_height: f64,
    /// Width of one card
    pub card_width: f64,
    /// Thickness of one deck
    pub deck_thickness: f64,
    /// Number of decks side by side
    pub deck_count: u32,
    /// Sheet thickness
    pub material_thickness: f64,
    /// Tab layout on the deck-thickness edges
    pub tab_strategy: TabStrategy,
}

impl Default for TraySettings {
    fn default() -> Self {
        let params = TrayParameters::default();
        Self {
            card_height: params.card_height,
            card_width: params.card_width,
            deck_thickness: params.deck_thickness,
            deck_count: params.deck_count,
            material_thickness: params.material_thickness,
            tab_strategy: params.tab_strategy,
        }
    }
}

/// Stroke settings passed to the SVG writer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSettings {
    /// Stroke colour
    pub color: String,
    /// Stroke width in mm
    pub line_width: f64,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            color: "blue".to_string(),
            line_width: 0.5,
        }
    }
}

/// Where and how panels are written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Output directory
    pub directory: PathBuf,
    /// File name prefix, files are named `{prefix}_{panel}.{ext}`
    pub prefix: String,
    /// Output format
    pub format: OutputFormat,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            prefix: "tray".to_string(),
            format: OutputFormat::Svg,
        }
    }
}

/// Laser settings for G-code output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaserSettings {
    /// Passes over every path
    pub passes: u32,
    /// Laser power (S word)
    pub power: u32,
    /// Feed rate in mm/min
    pub feed_rate: f64,
    /// Z drop between passes in mm
    pub z_step_down: f64,
}

impl Default for LaserSettings {
    fn default() -> Self {
        Self {
            passes: 1,
            power: 1000,
            feed_rate: 500.0,
            z_step_down: 0.5,
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
/// Missing sections and keys fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Tray dimensions
    pub tray: TraySettings,
    /// Drawing style
    pub style: StyleSettings,
    /// Output location and format
    pub output: OutputSettings,
    /// Laser settings
    pub laser: LaserSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Path of the per-user config file
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("cardtray").join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no config directory on this platform".to_string())
            })
    }

    /// Load the per-user config file, or defaults if there is none
    pub fn load_or_default() -> SettingsResult<Self> {
        match Self::default_path() {
            Ok(path) => Self::load_if_present(&path),
            Err(e) => {
                debug!("{}, using defaults", e);
                Ok(Self::default())
            }
        }
    }

    fn load_if_present(path: &Path) -> SettingsResult<Self> {
        if path.is_file() {
            Self::load_from_file(path)
        } else {
            debug!(path = %path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Load config from file (JSON or TOML)
    ///
    /// Values are not checked here so callers can override them first; call
    /// [`Config::validate`] before use.
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match Self::extension(path)? {
            "json" => serde_json::from_str(&content)?,
            _ => toml::from_str(&content)?,
        };

        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Self::extension(path)? {
            "json" => serde_json::to_string_pretty(self)?,
            _ => toml::to_string_pretty(self).map_err(|e| {
                SettingsError::SaveError(format!("Failed to serialize config: {}", e))
            })?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;

        debug!(path = %path.display(), "Saved config");
        Ok(())
    }

    fn extension(path: &Path) -> SettingsResult<&'static str> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok("json"),
            Some("toml") => Ok("toml"),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        self.tray_parameters().validate()?;

        if self.style.color.trim().is_empty() {
            return Err(invalid("style.color", "must not be empty"));
        }

        if !(self.style.line_width > 0.0 && self.style.line_width.is_finite()) {
            return Err(invalid("style.line_width", "must be > 0"));
        }

        if self.output.prefix.is_empty() {
            return Err(invalid("output.prefix", "must not be empty"));
        }

        if self.output.prefix.contains(['/', '\\']) {
            return Err(invalid("output.prefix", "must not contain path separators"));
        }

        if self.laser.passes == 0 {
            return Err(invalid("laser.passes", "must be at least 1"));
        }

        if self.laser.feed_rate <= 0.0 {
            return Err(invalid("laser.feed_rate", "must be > 0"));
        }

        if self.laser.z_step_down < 0.0 {
            return Err(invalid("laser.z_step_down", "must not be negative"));
        }

        Ok(())
    }

    /// Tray section as generator input
    pub fn tray_parameters(&self) -> TrayParameters {
        TrayParameters {
            card_height: self.tray.card_height,
            card_width: self.tray.card_width,
            deck_thickness: self.tray.deck_thickness,
            material_thickness: self.tray.material_thickness,
            deck_count: self.tray.deck_count,
            tab_strategy: self.tray.tab_strategy,
        }
    }

    /// Exporter for the configured output format
    pub fn exporter(&self) -> Box<dyn PanelExporter> {
        match self.output.format {
            OutputFormat::Svg => Box::new(SvgExporter::new(
                self.style.color.clone(),
                self.style.line_width,
            )),
            OutputFormat::Gcode => Box::new(GcodeExporter {
                passes: self.laser.passes,
                power: self.laser.power,
                feed_rate: self.laser.feed_rate,
                z_step_down: self.laser.z_step_down,
            }),
            OutputFormat::Json => Box::new(JsonExporter),
        }
    }
}

fn invalid(key: &str, reason: &str) -> SettingsError {
    SettingsError::InvalidSetting {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
