//! Error types for the page model.

use crate::ElementKind;
use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur while manipulating the page model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A content patch does not fit the element's kind.
    #[error("invalid patch for {kind} element: {reason}")]
    InvalidPatch { kind: ElementKind, reason: String },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Template name not in the gallery.
    #[error("unknown template: {0}")]
    UnknownTemplate(String),
}
