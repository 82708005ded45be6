//! Core type definitions for FunnelForge.
//!
//! This crate defines the small, domain-agnostic types shared by every
//! other crate in the workspace:
//! - Opaque element and page identifiers (fresh ones are UUID v7 text)
//! - Millisecond wall-clock timestamps for record bookkeeping
//! - Transient user-facing notifications ("toasts")
//!
//! Page and element models live in `funnelforge-model`, not here.

mod ids;
mod notification;
mod timestamp;

pub use ids::{ElementId, PageId};
pub use notification::{Notification, NotificationLevel};
pub use timestamp::Timestamp;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid id: {0:?}")]
    InvalidId(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
