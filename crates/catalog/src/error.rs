//! Error types for the catalog crate.

use thiserror::Error;

/// Errors that can occur while loading or querying the content store
#[derive(Error, Debug)]
pub enum StoreError {
    /// Seed file could not be found or opened
    #[error("Failed to open seed file: {path}")]
    SeedNotFound { path: String },

    /// I/O error occurred while reading a seed file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Seed file contents couldn't be deserialized
    #[error("Malformed seed data in {file}: {reason}")]
    MalformedSeed { file: String, reason: String },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// A content type string didn't match any known collection
    #[error("Unknown content type: {0}")]
    UnknownContentType(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, StoreError>;
