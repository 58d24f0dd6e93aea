//! Laser G-code export
//!
//! Panels are drafted on a y-down canvas; machine Y points up, so every
//! point is mirrored about the panel's bounding box and shifted to start at
//! the work origin.

use crate::cursor::Point;
use crate::error::{ExportError, ExportResult};
use crate::export::PanelExporter;
use crate::panel::Panel;

#[derive(Debug, Clone, PartialEq)]
pub struct GcodeExporter {
    /// Number of passes over every path.
    pub passes: u32,
    /// Spindle/laser power (`S` word).
    pub power: u32,
    /// Cutting feed rate in mm/min.
    pub feed_rate: f64,
    /// Z drop between passes.
    pub z_step_down: f64,
}

impl Default for GcodeExporter {
    fn default() -> Self {
        Self {
            passes: 1,
            power: 1000,
            feed_rate: 500.0,
            z_step_down: 0.5,
        }
    }
}

impl GcodeExporter {
    fn to_machine(panel: &Panel, point: &Point) -> (f64, f64) {
        (
            point.x - panel.bounds.min_x,
            panel.bounds.max_y - point.y,
        )
    }
}

impl PanelExporter for GcodeExporter {
    fn file_extension(&self) -> &'static str {
        "gcode"
    }

    fn render(&self, panel: &Panel) -> ExportResult<String> {
        if self.passes == 0 {
            return Err(ExportError::InvalidOption(
                "laser passes must be at least 1".to_string(),
            ));
        }

        let mut gcode = String::new();

        gcode.push_str("; Card Tray Maker G-code\n");
        gcode.push_str(&format!("; Panel: {}\n", panel.kind));
        gcode.push_str(&format!(
            "; Size: {}x{} mm\n",
            panel.width, panel.height
        ));
        gcode.push_str(&format!("; Paths: {}\n", panel.paths.len()));
        gcode.push_str(";\n");
        gcode.push_str("; --- Laser Settings ---\n");
        gcode.push_str(&format!("; Laser passes: {}\n", self.passes));
        gcode.push_str(&format!("; Laser power: S{}\n", self.power));
        gcode.push_str(&format!("; Feed rate: {:.0} mm/min\n", self.feed_rate));
        gcode.push_str(";\n");

        gcode.push_str("G21 ; Set units to millimeters\n");
        gcode.push_str("G90 ; Absolute positioning\n");
        gcode.push_str("G17 ; XY plane selection\n");
        gcode.push_str(&format!(
            "G0 Z{:.2} F{:.0} ; Move to safe height\n\n",
            5.0, self.feed_rate
        ));

        for (i, path) in panel.paths.iter().enumerate() {
            let Some(first_point) = path.points.first() else {
                continue;
            };
            let (start_x, start_y) = Self::to_machine(panel, first_point);

            gcode.push_str(&format!(
                "; Path {} ({})\n",
                i + 1,
                if path.closed { "closed" } else { "open" }
            ));
            gcode.push_str(&format!(
                "G0 X{:.2} Y{:.2} ; Rapid to start\n",
                start_x, start_y
            ));

            for pass_num in 1..=self.passes {
                let z_depth = -(pass_num as f64 - 1.0) * self.z_step_down;
                gcode.push_str(&format!(
                    "; Pass {}/{} at Z{:.2}\n",
                    pass_num, self.passes, z_depth
                ));

                if pass_num > 1 {
                    gcode.push_str(&format!("G0 Z{:.2} ; Move to pass depth\n", z_depth));
                }

                gcode.push_str(&format!("M3 S{} ; Laser on\n", self.power));

                for (idx, point) in path.points.iter().skip(1).enumerate() {
                    let (x, y) = Self::to_machine(panel, point);
                    if idx == 0 {
                        gcode.push_str(&format!(
                            "G1 X{:.2} Y{:.2} F{:.0}\n",
                            x, y, self.feed_rate
                        ));
                    } else {
                        gcode.push_str(&format!("G1 X{:.2} Y{:.2}\n", x, y));
                    }
                }

                gcode.push_str("M5 ; Laser off\n");

                if pass_num < self.passes {
                    gcode.push_str(&format!(
                        "G0 X{:.2} Y{:.2} ; Return to start\n",
                        start_x, start_y
                    ));
                }
            }

            gcode.push('\n');
        }

        gcode.push_str("M5 ; Ensure laser off\n");
        gcode.push_str("G0 Z10.0 ; Move to safe height\n");
        gcode.push_str("G0 X0 Y0 ; Return to origin\n");
        gcode.push_str("M2 ; Program end\n");

        Ok(gcode)
    }
}
