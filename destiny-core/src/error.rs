//! Error types for the boundary code around the scoring engine.
//!
//! The calculator itself never fails; these cover decoding stored records,
//! loading catalogs and sessions, and writing exports.

use std::io;
use thiserror::Error;

/// A single stored record could not be turned into its typed form.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("values payload is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("values payload is not a JSON object")]
    NotAnObject,
    #[error("value for factor `{factor}` is not a number")]
    NonNumeric { factor: &'static str },
    #[error("value for factor `{factor}` is out of range: {value}")]
    OutOfRange { factor: &'static str, value: f64 },
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read event catalog: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse event catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate event id `{0}` in catalog")]
    DuplicateId(String),
    #[error("event `{id}` has an out-of-range modifier {modifier}")]
    ModifierOutOfRange { id: String, modifier: i64 },
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to read session dump: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse session dump: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("export io failed: {0}")]
    Io(#[from] io::Error),
}
