//! Page records persisted as one collection.

use crate::error::StorageResult;
use crate::kv::KeyValueStore;
use funnelforge_model::Page;
use funnelforge_types::PageId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Configuration for the page repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Key under which the page collection is stored.
    pub collection_key: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            collection_key: "funnels".to_string(),
        }
    }
}

/// What a save did to the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveKind {
    Inserted,
    Replaced,
}

/// Reads and writes page records.
///
/// Every write is read-modify-write of the whole collection with no
/// conflict detection: the last writer wins. There is one editing session
/// per store.
///
/// Records are decoded one by one. A record that no longer decodes as a
/// [`Page`] is skipped by reads and written back untouched by writes, so
/// one bad record never locks the rest of the collection.
#[derive(Clone)]
pub struct PageRepository {
    store: Arc<dyn KeyValueStore>,
    config: RepositoryConfig,
}

impl PageRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_config(store, RepositoryConfig::default())
    }

    pub fn with_config(store: Arc<dyn KeyValueStore>, config: RepositoryConfig) -> Self {
        Self { store, config }
    }

    pub fn collection_key(&self) -> &str {
        &self.config.collection_key
    }

    /// All readable pages in collection order.
    pub fn list(&self) -> StorageResult<Vec<Page>> {
        Ok(self.records()?.iter().filter_map(decode).collect())
    }

    pub fn get(&self, id: &PageId) -> StorageResult<Option<Page>> {
        Ok(self
            .records()?
            .iter()
            .filter(|record| record_id(record) == Some(id.as_str()))
            .find_map(decode))
    }

    /// Replaces the record with the same id, or appends it.
    pub fn save(&self, page: &Page) -> StorageResult<SaveKind> {
        let mut records = self.records()?;
        let value = serde_json::to_value(page)?;
        let existing = records
            .iter_mut()
            .find(|record| record_id(record) == Some(page.id.as_str()));
        let kind = match existing {
            Some(record) => {
                *record = value;
                SaveKind::Replaced
            }
            None => {
                records.push(value);
                SaveKind::Inserted
            }
        };
        self.write_all(&records)?;
        debug!(page = %page.id, ?kind, total = records.len(), "page saved");
        Ok(kind)
    }

    /// Removes the record with `id`. Returns `false` if it was not stored.
    pub fn delete(&self, id: &PageId) -> StorageResult<bool> {
        let mut records = self.records()?;
        let before = records.len();
        records.retain(|record| record_id(record) != Some(id.as_str()));
        if records.len() == before {
            return Ok(false);
        }
        self.write_all(&records)?;
        info!(page = %id, "page deleted");
        Ok(true)
    }

    /// The stored collection as raw JSON records.
    fn records(&self) -> StorageResult<Vec<Value>> {
        match self.store.get(&self.config.collection_key)? {
            Some(json) if !json.trim().is_empty() => Ok(serde_json::from_str(&json)?),
            _ => Ok(Vec::new()),
        }
    }

    fn write_all(&self, records: &[Value]) -> StorageResult<()> {
        let json = serde_json::to_string(records)?;
        self.store.set(&self.config.collection_key, &json)
    }
}

fn record_id(record: &Value) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}

fn decode(record: &Value) -> Option<Page> {
    match Page::deserialize(record) {
        Ok(page) => Some(page),
        Err(e) => {
            warn!(
                page = record_id(record).unwrap_or("<no id>"),
                "skipping unreadable page record: {e}"
            );
            None
        }
    }
}
