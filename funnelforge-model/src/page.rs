use crate::element::{ElementKind, ElementPatch};
use crate::error::ModelResult;
use crate::store::ElementStore;
use funnelforge_types::{ElementId, PageId, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a saved page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageStatus {
    #[default]
    Draft,
    Completed,
    Published,
}

impl fmt::Display for PageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PageStatus::Draft => "draft",
            PageStatus::Completed => "completed",
            PageStatus::Published => "published",
        })
    }
}

/// Page-level presentation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSettings {
    pub background_color: String,
    pub max_width: String,
    pub font_family: String,
    pub seo_title: String,
    pub seo_description: String,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            background_color: "#ffffff".to_string(),
            max_width: "960px".to_string(),
            font_family: "Inter, sans-serif".to_string(),
            seo_title: String::new(),
            seo_description: String::new(),
        }
    }
}

/// One funnel step: an ordered element list plus record metadata.
///
/// This is also the persisted record layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Free-form label such as `"landing-page"`.
    #[serde(default = "default_page_type")]
    pub page_type: String,
    #[serde(default)]
    pub elements: ElementStore,
    #[serde(default)]
    pub settings: PageSettings,
    #[serde(default)]
    pub status: PageStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

fn default_page_type() -> String {
    "landing-page".to_string()
}

impl Page {
    /// Creates an empty draft page.
    pub fn new(name: impl Into<String>, page_type: impl Into<String>) -> Self {
        let now = Timestamp::now();
        Self {
            id: PageId::new(),
            name: name.into(),
            description: String::new(),
            page_type: page_type.into(),
            elements: ElementStore::new(),
            settings: PageSettings::default(),
            status: PageStatus::Draft,
            created_at: now,
            updated_at: now,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Stamps `updated_at`. Never moves it backwards.
    pub fn touch(&mut self) {
        self.updated_at = self.updated_at.advance();
    }

    pub fn add(&mut self, kind: ElementKind) -> ElementId {
        let id = self.elements.add(kind);
        self.touch();
        id
    }

    pub fn update(&mut self, id: &ElementId, patch: &ElementPatch) -> ModelResult<bool> {
        let updated = self.elements.update(id, patch)?;
        if updated {
            self.touch();
        }
        Ok(updated)
    }

    pub fn remove(&mut self, id: &ElementId) -> bool {
        let removed = self.elements.remove(id);
        if removed {
            self.touch();
        }
        removed
    }

    /// Marks the page as published.
    pub fn publish(&mut self) {
        self.status = PageStatus::Published;
        self.touch();
    }

    pub fn is_published(&self) -> bool {
        self.status == PageStatus::Published
    }
}
