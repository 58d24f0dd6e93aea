//! Panel export
//!
//! Every output format implements [`PanelExporter`]; [`write_panels`] writes
//! one file per panel named `{prefix}_{kind}.{ext}`.

pub mod gcode;
pub mod svg;

pub use gcode::GcodeExporter;
pub use svg::SvgExporter;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

use crate::error::{ExportError, ExportResult};
use crate::panel::Panel;

/// Renders one panel into the text of an output file.
pub trait PanelExporter {
    /// Extension of the files this exporter produces, without the dot.
    fn file_extension(&self) -> &'static str;

    fn render(&self, panel: &Panel) -> ExportResult<String>;
}

/// Output formats understood by [`write_panels`] callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Svg,
    Gcode,
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Gcode => "gcode",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "svg" => Ok(OutputFormat::Svg),
            "gcode" | "nc" | "ngc" => Ok(OutputFormat::Gcode),
            "json" => Ok(OutputFormat::Json),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Pretty-printed JSON dump of the panel geometry.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl PanelExporter for JsonExporter {
    fn file_extension(&self) -> &'static str {
        "json"
    }

    fn render(&self, panel: &Panel) -> ExportResult<String> {
        Ok(serde_json::to_string_pretty(panel)?)
    }
}

/// File name used for `panel` under `prefix`.
pub fn panel_file_name(prefix: &str, panel: &Panel, exporter: &dyn PanelExporter) -> String {
    format!(
        "{}_{}.{}",
        prefix,
        panel.kind.name(),
        exporter.file_extension()
    )
}

/// Render every panel and write it under `dir`, creating the directory if
/// needed. Returns the written paths in panel order.
pub fn write_panels(
    dir: &Path,
    prefix: &str,
    panels: &[&Panel],
    exporter: &dyn PanelExporter,
) -> ExportResult<Vec<PathBuf>> {
    // Render everything first so a failing panel leaves no partial output.
    let rendered = panels
        .iter()
        .map(|panel| Ok((panel_file_name(prefix, panel, exporter), exporter.render(panel)?)))
        .collect::<ExportResult<Vec<_>>>()?;

    fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(rendered.len());
    for (name, contents) in rendered {
        let path = dir.join(name);
        fs::write(&path, contents)?;
        debug!(path = %path.display(), "Wrote panel");
        written.push(path);
    }

    info!(count = written.len(), dir = %dir.display(), "Exported panels");
    Ok(written)
}

/// Format a coordinate without trailing zeros.
pub(crate) fn format_coord(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    // Avoid printing "-0".
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{}", rounded)
}
