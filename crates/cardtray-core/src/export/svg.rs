//! SVG export
//!
//! The canvas is declared in millimetres with a matching `viewBox`, so one
//! user unit is one millimetre in laser-cutter software.

use crate::error::ExportResult;
use crate::export::{format_coord, PanelExporter};
use crate::panel::{Panel, SubPath};

#[derive(Debug, Clone, PartialEq)]
pub struct SvgExporter {
    /// Stroke colour, any SVG colour value.
    pub color: String,
    /// Stroke width in millimetres.
    pub line_width: f64,
}

impl Default for SvgExporter {
    fn default() -> Self {
        Self {
            color: "blue".to_string(),
            line_width: 0.5,
        }
    }
}

impl SvgExporter {
    pub fn new(color: impl Into<String>, line_width: f64) -> Self {
        Self {
            color: color.into(),
            line_width,
        }
    }

    fn path_data(path: &SubPath) -> String {
        let mut data = String::new();
        for (idx, point) in path.points.iter().enumerate() {
            let command = if idx == 0 { "M" } else { "L" };
            data.push_str(&format!(
                "{} {} {} ",
                command,
                format_coord(point.x),
                format_coord(point.y)
            ));
        }
        if path.closed {
            data.push('Z');
        }
        data.trim_end().to_string()
    }
}

impl PanelExporter for SvgExporter {
    fn file_extension(&self) -> &'static str {
        "svg"
    }

    fn render(&self, panel: &Panel) -> ExportResult<String> {
        let mut svg = String::new();
        svg.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#);
        svg.push('\n');
        svg.push_str(&format!(
            r#"<svg width="{}mm" height="{}mm" viewBox="{} {} {} {}" xmlns="http://www.w3.org/2000/svg">"#,
            panel.width,
            panel.height,
            format_coord(panel.bounds.min_x),
            format_coord(panel.bounds.min_y),
            panel.width,
            panel.height
        ));
        svg.push('\n');
        svg.push_str(&format!("<!-- {} -->\n", panel.kind));

        let style = format!(
            "fill:none;stroke:{};stroke-width:{}",
            self.color, self.line_width
        );
        for path in panel.paths.iter().filter(|p| p.points.len() > 1) {
            svg.push_str(&format!(
                r#"<path d="{}" style="{}" />"#,
                Self::path_data(path),
                style
            ));
            svg.push('\n');
        }

        svg.push_str("</svg>\n");
        Ok(svg)
    }
}
