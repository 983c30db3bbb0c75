//! Error types for the covfilter library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the library.
#[derive(Error, Debug)]
pub enum CovFilterError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File {} doesn't exist.", .0.display())]
    NotFound(PathBuf),

    #[error("Missing column '{0}'")]
    MissingColumn(String),

    #[error("Empty data: {0}")]
    EmptyData(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, CovFilterError>;
