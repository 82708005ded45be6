//! Page composition model for FunnelForge.
//!
//! Defines the types every editor surface works against:
//! - [`VisualElement`]: one placeable unit with typed content, styles and an optional position
//! - [`ElementStore`]: the ordered element collection of one page plus its single selection
//! - [`Page`]: a funnel step record (elements, settings, status, timestamps)
//! - [`PageTemplate`]: the template gallery pages are started from
//! - [`render`]: dispatch from element kind to an HTML fragment
//!
//! Default content and styles per kind come from [`defaults`].

pub mod defaults;
mod element;
mod error;
mod page;
pub mod render;
mod store;
mod template;

pub use element::{
    ButtonContent, ContainerContent, ElementContent, ElementKind, ElementPatch, FormContent,
    FormField, HeadingContent, ImageContent, Position, Styles, TextContent, VisualElement,
};
pub use error::{ModelError, ModelResult};
pub use page::{Page, PageSettings, PageStatus};
pub use store::ElementStore;
pub use template::PageTemplate;
