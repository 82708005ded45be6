//! Identifier types used throughout FunnelForge.
//!
//! Ids are opaque, non-empty strings. Fresh ones are UUID v7 text, so ids
//! minted by this build sort by creation time, but any non-empty string
//! loaded from storage is accepted and written back unchanged.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident, $what:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(Arc<str>);

        impl $name {
            #[doc = concat!("Mints a fresh ", $what, " id (UUID v7 text).")]
            #[must_use]
            pub fn new() -> Self {
                Self(Arc::from(Uuid::now_v7().to_string()))
            }

            #[doc = concat!("Parses a ", $what, " id. Any non-empty string is accepted.")]
            pub fn parse(s: &str) -> Result<Self> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(Error::InvalidId(s.to_string()));
                }
                Ok(Self(Arc::from(trimmed)))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                Self::parse(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = Error;

            fn try_from(s: String) -> Result<Self> {
                if s.trim().is_empty() {
                    return Err(Error::InvalidId(s));
                }
                Ok(Self(Arc::from(s)))
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0.to_string()
            }
        }
    };
}

opaque_id!(
    /// Unique identifier for a visual element on a page.
    ElementId,
    "element"
);

opaque_id!(
    /// Unique identifier for a page (funnel step) record.
    PageId,
    "page"
);
