use std::path::{Path, PathBuf};

use anyhow::Context;
use cardtray_core::{write_panels, CardTrayMaker, OutputFormat, TabStrategy, TrayLayout};
use cardtray_settings::Config;
use clap::{ArgAction, Parser};
use tracing::{debug, info};

#[derive(Debug, Parser)]
#[command(
    name = "cardtray",
    about = "Generate laser-cut panels for a finger-jointed card deck tray",
    version = crate::LONG_VERSION
)]
pub struct Cli {
    /// Card height in mm
    #[arg(short = 'H', long)]
    pub card_height: Option<f64>,

    /// Card width in mm
    #[arg(short = 'W', long)]
    pub card_width: Option<f64>,

    /// Thickness of one deck in mm
    #[arg(short = 'd', long)]
    pub deck_thickness: Option<f64>,

    /// Number of decks side by side
    #[arg(short = 'n', long = "decks")]
    pub decks: Option<u32>,

    /// Sheet material thickness in mm
    #[arg(short = 'm', long = "material")]
    pub material: Option<f64>,

    /// Tab layout on the deck-thickness edges (centered or distributed)
    #[arg(long)]
    pub tabs: Option<TabStrategy>,

    /// SVG stroke colour
    #[arg(long)]
    pub color: Option<String>,

    /// SVG stroke width in mm
    #[arg(long)]
    pub line_width: Option<f64>,

    /// Directory the panel files are written to
    #[arg(short = 'o', long)]
    pub output_dir: Option<PathBuf>,

    /// File name prefix
    #[arg(long)]
    pub prefix: Option<String>,

    /// Output format (svg, gcode or json)
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Laser passes per path (G-code only)
    #[arg(long)]
    pub passes: Option<u32>,

    /// Laser power S word (G-code only)
    #[arg(long)]
    pub power: Option<u32>,

    /// Feed rate in mm/min (G-code only)
    #[arg(long)]
    pub feed_rate: Option<f64>,

    /// Config file to start from instead of the per-user one
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Write the effective settings to this file
    #[arg(long)]
    pub save_config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl Cli {
    /// Copy every flag that was given over the loaded config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(value) = self.card_height {
            config.tray.card_height = value;
        }
        if let Some(value) = self.card_width {
            config.tray.card_width = value;
        }
        if let Some(value) = self.deck_thickness {
            config.tray.deck_thickness = value;
        }
        if let Some(value) = self.decks {
            config.tray.deck_count = value;
        }
        if let Some(value) = self.material {
            config.tray.material_thickness = value;
        }
        if let Some(value) = self.tabs {
            config.tray.tab_strategy = value;
        }
        if let Some(value) = &self.color {
            config.style.color = value.clone();
        }
        if let Some(value) = self.line_width {
            config.style.line_width = value;
        }
        if let Some(value) = &self.output_dir {
            config.output.directory = value.clone();
        }
        if let Some(value) = &self.prefix {
            config.output.prefix = value.clone();
        }
        if let Some(value) = self.format {
            config.output.format = value;
        }
        if let Some(value) = self.passes {
            config.laser.passes = value;
        }
        if let Some(value) = self.power {
            config.laser.power = value;
        }
        if let Some(value) = self.feed_rate {
            config.laser.feed_rate = value;
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Config::load_or_default().context("Failed to load the user config"),
    }
}

/// One `"{kind} size: {w}mm * {h}mm"` line per panel.
pub fn size_report(tray: &TrayLayout) -> Vec<String> {
    tray.panels()
        .iter()
        .map(|panel| format!("{} size: {}mm * {}mm", panel.kind, panel.width, panel.height))
        .collect()
}

/// Generate the tray described by the config and flags, write its panels and
/// print their sizes. Returns the written file paths.
pub fn run(cli: Cli) -> anyhow::Result<Vec<PathBuf>> {
    let mut config = load_config(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    config.validate().context("Invalid settings")?;

    if let Some(path) = &cli.save_config {
        config
            .save_to_file(path)
            .with_context(|| format!("Failed to save config {}", path.display()))?;
        info!(path = %path.display(), "Saved settings");
    }

    let maker = CardTrayMaker::new(config.tray_parameters())?;
    let tray = maker.generate()?;

    for line in size_report(&tray) {
        println!("{}", line);
    }
    for adjustment in &tray.adjustments {
        println!("Note: {}", adjustment);
    }

    let exporter = config.exporter();
    let written = write_panels(
        &config.output.directory,
        &config.output.prefix,
        &tray.panels(),
        exporter.as_ref(),
    )?;
    debug!(files = written.len(), "Panels written");

    Ok(written)
}
