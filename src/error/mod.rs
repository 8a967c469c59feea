//! Error handling module for aom-keyframes

use thiserror::Error;

/// Main error type for keyframe prediction
#[derive(Error, Debug)]
pub enum AomKfError {
    /// Stats file not found
    #[error("Stats file not found: {path}")]
    StatsFileNotFound { path: String },

    /// Stats file exists but could not be read
    #[error("Failed to read stats file {path}: {source}")]
    StatsReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Trailing bytes that do not form a full record (strict loading only)
    #[error("Truncated first-pass record: {trailing_bytes} trailing bytes after {complete_records} complete records")]
    TruncatedRecord {
        complete_records: usize,
        trailing_bytes: usize,
    },

    /// Configuration error
    #[error("Invalid configuration: {message}")]
    ConfigError { message: String },

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for aom-keyframes operations
pub type AomKfResult<T> = std::result::Result<T, AomKfError>;
