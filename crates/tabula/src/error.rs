//! Error types for the Tabula library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Tabula operations.
///
/// Statistical operations never return these for "not enough data"; they
/// yield `None` or empty collections instead. Errors are reserved for
/// structural problems: unreadable input, unknown names, absent columns.
#[derive(Debug, Error)]
pub enum TabulaError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Empty file or no data to analyze.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// File format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// An argument was malformed (unknown operator, chart type, strategy...).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A referenced column (or other named item) does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl TabulaError {
    /// Shorthand for a missing column.
    pub fn column_not_found(name: &str) -> Self {
        TabulaError::NotFound(format!("column '{}' not found in dataset", name))
    }
}

/// Result type alias for Tabula operations.
pub type Result<T> = std::result::Result<T, TabulaError>;
