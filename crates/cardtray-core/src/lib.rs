//! # CardTray Core
//!
//! Drafting engine and panel generators for laser-cut card trays: a row of
//! card decks separated by finger-jointed dividers, standing on a bottom
//! panel between a back wall and a set of front stubs.
//!
//! ## Modules
//!
//! - **Cursor**: turtle-style drafting cursor with pen state and recorded polylines
//! - **Joints**: notch, jog and rectangle primitives every joint is built from
//! - **Panel**: scoped drafting sessions, bounding boxes and closure checks
//! - **Card Tray**: parameter validation, shared joint layout and the four panel generators
//! - **Export**: SVG, laser G-code and JSON output
//! - **Error**: error types for validation, geometry and export

pub mod card_tray;
pub mod cursor;
pub mod error;
pub mod export;
pub mod joints;
pub mod panel;

// Re-export commonly used items
pub use card_tray::{
    Adjustment, CardTrayMaker, LayoutParameters, Parity, TabStrategy, TrayLayout, TrayParameters,
};
pub use cursor::{Cursor, Heading, Point};
pub use error::{ExportError, ParameterError, TrayError, TrayResult};
pub use export::{
    write_panels, GcodeExporter, JsonExporter, OutputFormat, PanelExporter, SvgExporter,
};
pub use joints::JointPrimitives;
pub use panel::{Panel, PanelBuilder, PanelKind};
