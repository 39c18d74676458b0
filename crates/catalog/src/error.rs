//! Error types for the catalog crate.

use crate::types::ContentId;
use thiserror::Error;

/// Errors that can occur while building a catalog or loading snapshots
#[derive(Error, Debug)]
pub enum CatalogError {
    /// I/O error occurred while reading a snapshot file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot file couldn't be parsed as JSON
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Two catalog entries share the same id
    #[error("Duplicate content id {id} in catalog")]
    DuplicateId { id: ContentId },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
