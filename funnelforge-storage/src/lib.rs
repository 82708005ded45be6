//! Persistence for FunnelForge pages.
//!
//! Pages are stored the way a browser editor keeps them in local storage:
//! one JSON array of page records under a single collection key in a
//! key-value store.
//!
//! # Architecture
//!
//! - [`KeyValueStore`] abstracts the durable store ([`MemoryStore`], [`FileStore`])
//! - [`PageRepository`] does read-modify-write of the whole collection (last writer wins)
//! - [`Autosaver`] is a scoped background task that saves the page on an interval

mod autosave;
mod error;
mod kv;
mod repository;

pub use autosave::{AutosaveConfig, Autosaver, SaveReason, SharedPage};
pub use error::{StorageError, StorageResult};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use repository::{PageRepository, RepositoryConfig, SaveKind};
