//! Application layer behind the `funnelforge` binary.
//!
//! Every command is a short editing session: load the page, apply one
//! operation through [`EditorSession`], close the session (which writes the
//! page back). Pages live in a [`FileStore`] under the data directory.

use anyhow::{bail, Context, Result};
use funnelforge_editor::{EditorConfig, EditorSession};
use funnelforge_generation::{
    BusinessProfile, FunnelGenerator, GeneratedContent, GenerationRequest, GenerationService,
    GenerationWorkflow, HttpGenerationClient, HttpGenerationConfig, StageProgress,
    WorkflowConfig,
};
use funnelforge_model::{render, ElementKind, ElementPatch, Page, PageTemplate};
use funnelforge_storage::{FileStore, KeyValueStore, PageRepository, RepositoryConfig};
use funnelforge_types::{ElementId, Notification, PageId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Optional JSON configuration file. Every section falls back to defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub repository: RepositoryConfig,
    pub editor: EditorConfig,
    pub workflow: WorkflowConfig,
    /// Remote generation backend, used by `generate --remote`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation: Option<HttpGenerationConfig>,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

pub struct App {
    repo: Arc<PageRepository>,
    config: AppConfig,
    notifications: Option<mpsc::UnboundedSender<Notification>>,
}

impl App {
    /// Opens the page collection stored under `data_dir`.
    pub fn open(
        data_dir: &Path,
        config: AppConfig,
        notifications: Option<mpsc::UnboundedSender<Notification>>,
    ) -> Result<Self> {
        let store = FileStore::open(data_dir)
            .with_context(|| format!("Failed to open data directory {}", data_dir.display()))?;
        Ok(Self::with_store(Arc::new(store), config, notifications))
    }

    pub fn with_store(
        store: Arc<dyn KeyValueStore>,
        config: AppConfig,
        notifications: Option<mpsc::UnboundedSender<Notification>>,
    ) -> Self {
        let repo = PageRepository::with_config(store, config.repository.clone());
        Self {
            repo: Arc::new(repo),
            config,
            notifications,
        }
    }

    pub fn repository(&self) -> &PageRepository {
        &self.repo
    }

    /// Creates a page from `template` and saves it.
    pub async fn create_page(&self, name: &str, template: PageTemplate) -> Result<Page> {
        let session = EditorSession::from_template(
            Arc::clone(&self.repo),
            template,
            name,
            self.editor_config(),
            self.notifications.clone(),
        );
        let page = session.close().await?;
        info!(page = %page.id, %template, "page created");
        Ok(page)
    }

    pub fn list_pages(&self) -> Result<Vec<Page>> {
        Ok(self.repo.list()?)
    }

    pub fn find_page(&self, id: &PageId) -> Result<Page> {
        self.repo
            .get(id)?
            .with_context(|| format!("No page with id {id}"))
    }

    /// Appends a default element of `kind`, or nests it under `parent`.
    pub async fn add_element(
        &self,
        page: &PageId,
        kind: ElementKind,
        parent: Option<&ElementId>,
    ) -> Result<ElementId> {
        let session = self.resume(page).await?;
        let added = match parent {
            Some(parent) => session
                .add_child(parent, kind)
                .await
                .with_context(|| format!("Element {parent} is not a container on page {page}")),
            None => Ok(session.add(kind).await),
        };
        session.close().await?;
        added
    }

    /// Applies `patch` to an element. `Ok(false)` if the element is absent.
    pub async fn update_element(
        &self,
        page: &PageId,
        element: &ElementId,
        patch: &ElementPatch,
    ) -> Result<bool> {
        let session = self.resume(page).await?;
        let outcome = session.update(element, patch).await;
        session.close().await?;
        Ok(outcome?)
    }

    pub async fn remove_element(&self, page: &PageId, element: &ElementId) -> Result<bool> {
        let session = self.resume(page).await?;
        let removed = session.remove(element).await;
        session.close().await?;
        Ok(removed)
    }

    pub fn render_page(&self, page: &PageId) -> Result<String> {
        Ok(render::render_page(&self.find_page(page)?))
    }

    pub async fn publish_page(&self, page: &PageId) -> Result<Page> {
        let session = self.resume(page).await?;
        session.publish().await?;
        Ok(session.close().await?)
    }

    /// The stored content of an element as JSON, `None` if it is absent.
    pub fn element_content(&self, page: &PageId, element: &ElementId) -> Result<Option<Value>> {
        let page = self.find_page(page)?;
        let Some(element) = page.elements.get(element) else {
            return Ok(None);
        };
        let mut record = serde_json::to_value(element)?;
        Ok(Some(record["content"].take()))
    }

    pub fn delete_page(&self, page: &PageId) -> Result<bool> {
        Ok(self.repo.delete(page)?)
    }

    /// Runs the simulated generation workflow and saves the resulting page.
    pub async fn generate(
        &self,
        profile: &BusinessProfile,
        on_progress: impl FnMut(&StageProgress),
    ) -> Result<Page> {
        let generator = FunnelGenerator::new(
            GenerationWorkflow::new(self.config.workflow.clone()),
            self.notifications.clone(),
        );
        let blueprint = generator.generate(profile, on_progress).await?;
        let session = EditorSession::open(
            Arc::clone(&self.repo),
            blueprint.to_page(),
            self.editor_config(),
            self.notifications.clone(),
        );
        session.mark_completed().await;
        let page = session.close().await?;
        info!(page = %page.id, elements = page.elements.len(), "generated page saved");
        Ok(page)
    }

    /// Sends the profile to the configured remote generation backend.
    pub async fn generate_remote(&self, profile: &BusinessProfile) -> Result<GeneratedContent> {
        let Some(config) = self.config.generation.clone() else {
            bail!("No generation backend configured; add a `generation` section to the config file");
        };
        if let Err(e) = profile.validate() {
            self.notify(e.to_notification());
            return Err(e.into());
        }
        let client = HttpGenerationClient::new(config, self.notifications.clone())?;
        debug!(backend = client.name(), endpoint = client.endpoint(), "remote generation");
        Ok(client.generate(&GenerationRequest::from(profile)).await?)
    }

    fn editor_config(&self) -> EditorConfig {
        self.config.editor.clone()
    }

    async fn resume(&self, page: &PageId) -> Result<EditorSession> {
        Ok(EditorSession::resume(
            Arc::clone(&self.repo),
            page.clone(),
            self.editor_config(),
            self.notifications.clone(),
        )
        .await?)
    }

    fn notify(&self, notification: Notification) {
        if let Some(tx) = &self.notifications {
            let _ = tx.send(notification);
        }
    }
}

/// Parses an element kind from the palette. `unknown` is not placeable.
pub fn parse_kind(name: &str) -> Result<ElementKind> {
    match ElementKind::from_name(name) {
        ElementKind::Unknown => {
            let palette: Vec<_> = ElementKind::ALL.iter().map(|k| k.as_str()).collect();
            bail!("Unknown element type `{name}` (expected one of: {})", palette.join(", "))
        }
        kind => Ok(kind),
    }
}

/// Splits `field=value` and types the value after the field's current value
/// in `content`. A bare `null` clears the field.
pub fn parse_assignment(raw: &str, content: Option<&Value>) -> Result<(String, Value)> {
    let Some((key, value)) = raw.split_once('=') else {
        bail!("Expected `field=value`, got `{raw}`");
    };
    let key = key.trim();
    if key.is_empty() {
        bail!("Missing field name in `{raw}`");
    }
    let current = content.and_then(|c| c.get(key));
    Ok((key.to_string(), coerce(key, value, current)?))
}

fn coerce(field: &str, raw: &str, current: Option<&Value>) -> Result<Value> {
    let trimmed = raw.trim();
    if trimmed == "null" {
        return Ok(Value::Null);
    }
    match current {
        // Optional text fields are stored as null until set.
        Some(Value::String(_) | Value::Null) => Ok(Value::String(raw.to_string())),
        Some(Value::Number(_)) => match serde_json::from_str::<Value>(trimmed) {
            Ok(number @ Value::Number(_)) => Ok(number),
            _ => bail!("Field `{field}` expects a number, got `{raw}`"),
        },
        Some(Value::Bool(_)) => trimmed
            .parse::<bool>()
            .map(Value::Bool)
            .with_context(|| format!("Field `{field}` expects true or false, got `{raw}`")),
        Some(Value::Array(_) | Value::Object(_)) => serde_json::from_str(trimmed)
            .with_context(|| format!("Field `{field}` expects JSON, got `{raw}`")),
        // Unknown field: numbers, arrays and objects are read as JSON.
        None => Ok(match serde_json::from_str::<Value>(raw) {
            Ok(parsed @ (Value::Number(_) | Value::Array(_) | Value::Object(_))) => parsed,
            _ => Value::String(raw.to_string()),
        }),
    }
}

/// Builds a patch from `--set`, `--style` and `--unset-style` arguments.
/// `content` is the element's current content, used to type `--set` values.
pub fn build_patch(
    sets: &[String],
    styles: &[String],
    unset_styles: &[String],
    content: Option<&Value>,
) -> Result<ElementPatch> {
    let mut patch = ElementPatch::new();
    for raw in sets {
        let (field, value) = parse_assignment(raw, content)?;
        patch = patch.set_content(field, value);
    }
    for raw in styles {
        let Some((property, value)) = raw.split_once('=') else {
            bail!("Expected `property=value`, got `{raw}`");
        };
        patch = patch.set_style(property.trim(), value.trim());
    }
    for property in unset_styles {
        patch = patch.remove_style(property.trim());
    }
    if patch.is_empty() {
        bail!("Nothing to update; pass --set, --style or --unset-style");
    }
    Ok(patch)
}
