//! Error types.

use thiserror::Error;

use crate::calculator::{CalcField, CalcMode};

/// Rejected selection changes. The selection is left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Unknown brand: {0}")]
    UnknownBrand(String),
    #[error("Unknown projector {projector} for brand {brand}")]
    UnknownProjector { brand: String, projector: String },
    #[error("Unknown lens {lens} for projector {projector}")]
    UnknownLens { projector: String, lens: String },
    #[error("Select a brand before choosing a projector")]
    NoBrand,
    #[error("Select a projector before choosing a lens")]
    NoProjector,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculatorError {
    #[error("{field:?} is computed in {mode:?} mode and cannot be edited")]
    ReadOnly { field: CalcField, mode: CalcMode },
    #[error("{0:?} must be a finite number")]
    NonFinite(CalcField),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Invalid light colour {0:?}, expected #rrggbb")]
    InvalidColor(String),
}

/// Failures while reading or writing session files.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JSON session: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid XML session: {0}")]
    Xml(String),
    #[error("No configuration directory available on this platform")]
    NoConfigDir,
}
