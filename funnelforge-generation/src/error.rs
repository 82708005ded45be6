//! Error types for generation.

use crate::profile::RequiredField;
use funnelforge_types::Notification;
use thiserror::Error;

/// Result type for generation operations.
pub type GenerationResult<T> = Result<T, GenerationError>;

/// Errors that can occur while generating a funnel.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Required profile fields are empty. Blocks progression.
    #[error("missing required fields: {}", field_list(.missing))]
    Validation { missing: Vec<RequiredField> },

    /// The generation backend could not be reached or answered with an error.
    #[error("generation service error: {0}")]
    Service(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn field_list(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}

impl GenerationError {
    /// The notification shown to the user for this failure.
    ///
    /// Backend failures all map to one generic message; details go to the log.
    pub fn to_notification(&self) -> Notification {
        match self {
            GenerationError::Validation { missing } => Notification::error("Missing information")
                .with_description(format!("Please fill in: {}", field_list(missing))),
            GenerationError::Service(_) | GenerationError::Serialization(_) => {
                Notification::error("Generation failed")
                    .with_description("Something went wrong. Please try again.")
            }
        }
    }
}
