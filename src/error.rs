use std::path::PathBuf;
use thiserror::Error;

use crate::histogram::NormalizeReference;

/// Main error type for histogram operations
#[derive(Error, Debug)]
pub enum HistogramError {
    #[error("Cannot list directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read sample file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {0}")]
    FileNotFound(String),

    /// The reference count chosen for normalization is zero.
    #[error("Cannot normalize: {reference} count is zero")]
    ZeroReference { reference: NormalizeReference },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Serialization error: {0}")]
    Serialize(String),
}

/// Result type alias for histogram operations
pub type Result<T> = std::result::Result<T, HistogramError>;
