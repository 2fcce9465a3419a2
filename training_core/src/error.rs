//! Error types for the training_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for training_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Durable blob could not be read or decoded
    #[error("Storage read error: {0}")]
    StorageRead(String),

    /// Durable blob could not be written
    #[error("Storage write error: {0}")]
    StorageWrite(String),

    /// Import document is not valid JSON or has the wrong shape
    #[error("Import failed: {0}")]
    ImportParse(String),

    /// Export could not be handed to the platform
    #[error("Export failed: {0}")]
    ExportTransport(String),

    /// Weight entry is not a finite positive number
    #[error("Invalid weight: {0}")]
    InvalidWeight(String),

    /// Date key is not a `YYYY-MM-DD` calendar day
    #[error("Invalid date key: {0}")]
    InvalidDateKey(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
