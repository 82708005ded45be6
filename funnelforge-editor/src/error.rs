//! Error types for editing sessions.

use funnelforge_model::ModelError;
use funnelforge_storage::StorageError;
use funnelforge_types::PageId;
use thiserror::Error;

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// Errors that can occur in an editing session.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Persisting or loading the page failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// An element operation was rejected by the model.
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    /// No saved page has the requested id.
    #[error("page not found: {0}")]
    PageNotFound(PageId),
}
