//! Error types for the storage layer.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Key contains characters the backing store cannot represent.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Invalid data.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Background task failed or was cancelled mid-write.
    #[error("task error: {0}")]
    Task(String),
}
