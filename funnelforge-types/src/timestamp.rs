//! Wall-clock timestamps for record bookkeeping.
//!
//! Pages carry `created_at` / `updated_at` in milliseconds since the Unix
//! epoch. [`Timestamp::advance`] never moves backwards, so a record's
//! `updated_at` stays monotonic even if the system clock steps back.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(u64);

fn wall_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

impl Timestamp {
    /// Creates a timestamp at the current time.
    #[must_use]
    pub fn now() -> Self {
        Self(wall_millis())
    }

    /// Creates a timestamp from raw milliseconds.
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    #[must_use]
    pub const fn as_millis(&self) -> u64 {
        self.0
    }

    /// Returns the later of "now" and `self`.
    ///
    /// Use this when stamping a modification of a record that already
    /// carries a timestamp.
    #[must_use]
    pub fn advance(&self) -> Self {
        Self(wall_millis().max(self.0))
    }

    /// Converts to a UTC date-time, if the value is in chrono's range.
    pub fn to_datetime(&self) -> crate::Result<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.0 as i64)
            .ok_or_else(|| crate::Error::InvalidTimestamp(self.0.to_string()))
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Ok(dt) => write!(f, "{}", dt.to_rfc3339_opts(SecondsFormat::Secs, true)),
            Err(_) => write!(f, "{}ms", self.0),
        }
    }
}
