//! Error types for the card tray crate.
//!
//! This module provides structured error types for parameter validation,
//! panel geometry checks and artifact export.

use std::io;
use thiserror::Error;

/// Errors that can occur while generating a tray.
#[derive(Error, Debug)]
pub enum TrayError {
    /// A parameter validation error occurred.
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),

    /// A traced outline that should be closed does not return to its start.
    #[error("Geometry integrity error in {panel} path {path}: outline misses its start by {gap:.6}mm")]
    GeometryIntegrity {
        /// Name of the panel being drafted.
        panel: String,
        /// Index of the offending sub-path within the panel.
        path: usize,
        /// Distance between the last and the first point.
        gap: f64,
    },

    /// A drafting session finished without recording anything.
    #[error("Panel {0} has no recorded geometry")]
    EmptyPanel(String),

    /// Writing an artifact failed.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

/// Errors related to tray parameter validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A dimension is zero or negative.
    #[error("Parameter '{name}' must be positive, got {value}")]
    NonPositive { name: String, value: f64 },

    /// A dimension is NaN or infinite.
    #[error("Parameter '{name}' must be a finite number")]
    NotFinite { name: String },

    /// A value is below the smallest workable size.
    #[error("Parameter '{name}' too small: {value} (must exceed {min})")]
    BelowMinimum { name: String, value: f64, min: f64 },

    /// A parameter value is out of the valid range.
    #[error("Parameter '{name}' out of range: {value} (valid: {min}..{max})")]
    OutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Parameters are mutually incompatible.
    #[error("Incompatible parameters: {0}")]
    Incompatible(String),
}

/// Errors related to serializing panels.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The requested output format is not supported.
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// An exporter setting cannot produce usable output.
    #[error("Invalid export option: {0}")]
    InvalidOption(String),

    /// I/O error while writing an artifact.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for tray operations.
pub type TrayResult<T> = Result<T, TrayError>;

/// Result type alias for parameter validation.
pub type ParameterResult<T> = Result<T, ParameterError>;

/// Result type alias for export operations.
pub type ExportResult<T> = Result<T, ExportError>;
