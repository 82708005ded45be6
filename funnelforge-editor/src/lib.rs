//! Editing sessions for FunnelForge pages.
//!
//! An [`EditorSession`] is the one element-store state machine every editor
//! surface (list editor, free-form canvas, generated-funnel review) drives.
//! It owns the page being edited, keeps its autosave task alive for the
//! lifetime of the session, and turns explicit Save / Publish actions into
//! persisted records plus user notifications.

mod error;
mod session;

pub use error::{EditorError, EditorResult};
pub use session::{EditorConfig, EditorSession};
