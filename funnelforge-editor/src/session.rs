use crate::error::{EditorError, EditorResult};
use funnelforge_model::{
    render, ElementKind, ElementPatch, Page, PageSettings, PageStatus, PageTemplate,
};
use funnelforge_storage::{
    AutosaveConfig, Autosaver, PageRepository, SaveKind, SaveReason, SharedPage,
};
use funnelforge_types::{ElementId, Notification, PageId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::{debug, info};

/// Configuration for an editing session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub autosave: AutosaveConfig,
}

/// One editing session over one page.
///
/// Element operations lock the shared page, mutate it synchronously and
/// stamp `updated_at`; the autosave task picks up the result on its next
/// tick. Dropping the session aborts autosave, `close()` stops it cleanly
/// and flushes a final save.
pub struct EditorSession {
    page: SharedPage,
    autosaver: Autosaver,
    notifications: Option<mpsc::UnboundedSender<Notification>>,
}

impl EditorSession {
    /// Starts a session on `page` and begins autosaving it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn open(
        repo: Arc<PageRepository>,
        page: Page,
        config: EditorConfig,
        notifications: Option<mpsc::UnboundedSender<Notification>>,
    ) -> Self {
        info!(page = %page.id, name = %page.name, "editing session opened");
        let page = Arc::new(RwLock::new(page));
        let autosaver = Autosaver::spawn(
            repo,
            Arc::clone(&page),
            config.autosave,
            notifications.clone(),
        );
        Self {
            page,
            autosaver,
            notifications,
        }
    }

    /// Starts a session on a new page built from `template`.
    pub fn from_template(
        repo: Arc<PageRepository>,
        template: PageTemplate,
        name: impl Into<String>,
        config: EditorConfig,
        notifications: Option<mpsc::UnboundedSender<Notification>>,
    ) -> Self {
        Self::open(repo, template.instantiate(name), config, notifications)
    }

    /// Starts a session on a previously saved page.
    pub async fn resume(
        repo: Arc<PageRepository>,
        id: PageId,
        config: EditorConfig,
        notifications: Option<mpsc::UnboundedSender<Notification>>,
    ) -> EditorResult<Self> {
        let lookup = Arc::clone(&repo);
        let key = id.clone();
        let page = tokio::task::spawn_blocking(move || lookup.get(&key))
            .await
            .map_err(|e| funnelforge_storage::StorageError::Task(e.to_string()))??
            .ok_or(EditorError::PageNotFound(id))?;
        Ok(Self::open(repo, page, config, notifications))
    }

    pub async fn page_id(&self) -> PageId {
        self.page.read().await.id.clone()
    }

    /// A copy of the page as it is right now.
    pub async fn snapshot(&self) -> Page {
        self.page.read().await.clone()
    }

    /// The page handle shared with the autosave task.
    pub fn shared_page(&self) -> SharedPage {
        Arc::clone(&self.page)
    }

    // ── Element operations ───────────────────────────────────────

    pub async fn add(&self, kind: ElementKind) -> ElementId {
        self.page.write().await.add(kind)
    }

    pub async fn add_child(&self, parent: &ElementId, kind: ElementKind) -> Option<ElementId> {
        let mut page = self.page.write().await;
        let id = page.elements.add_child(parent, kind)?;
        page.touch();
        Some(id)
    }

    /// Merges `patch` into element `id`. `Ok(false)` if the element is absent.
    pub async fn update(&self, id: &ElementId, patch: &ElementPatch) -> EditorResult<bool> {
        Ok(self.page.write().await.update(id, patch)?)
    }

    pub async fn remove(&self, id: &ElementId) -> bool {
        self.page.write().await.remove(id)
    }

    /// Sets or clears the selection. Selection is session state and does
    /// not change `updated_at`.
    pub async fn select(&self, id: Option<ElementId>) -> bool {
        self.page.write().await.elements.select(id)
    }

    pub async fn selected(&self) -> Option<ElementId> {
        self.page.read().await.elements.selected().cloned()
    }

    pub async fn move_to(&self, id: &ElementId, index: usize) -> bool {
        let mut page = self.page.write().await;
        let moved = page.elements.move_to(id, index);
        if moved {
            page.touch();
        }
        moved
    }

    pub async fn duplicate(&self, id: &ElementId) -> Option<ElementId> {
        let mut page = self.page.write().await;
        let copy = page.elements.duplicate(id)?;
        page.touch();
        Some(copy)
    }

    /// Edits page-level settings in place.
    pub async fn update_settings(&self, edit: impl FnOnce(&mut PageSettings)) {
        let mut page = self.page.write().await;
        edit(&mut page.settings);
        page.touch();
    }

    /// Change counter of the element store, for re-render decisions.
    pub async fn revision(&self) -> u64 {
        self.page.read().await.elements.revision()
    }

    /// Renders the current page to HTML.
    pub async fn render(&self) -> String {
        render::render_page(&*self.page.read().await)
    }

    // ── Persistence ──────────────────────────────────────────────

    /// Explicit "Save".
    pub async fn save(&self) -> EditorResult<SaveKind> {
        Ok(self.autosaver.save_now(SaveReason::Manual).await?)
    }

    /// Explicit "Publish": marks the page published and saves it. If the
    /// save fails the previous status is restored.
    pub async fn publish(&self) -> EditorResult<SaveKind> {
        let previous = {
            let mut page = self.page.write().await;
            let previous = page.status;
            page.publish();
            previous
        };
        match self.autosaver.save_now(SaveReason::Publish).await {
            Ok(kind) => {
                info!(page = %self.page_id().await, "page published");
                Ok(kind)
            }
            Err(e) => {
                self.page.write().await.status = previous;
                Err(e.into())
            }
        }
    }

    /// Marks the page completed (ready for review) without publishing.
    pub async fn mark_completed(&self) {
        let mut page = self.page.write().await;
        if page.status == PageStatus::Draft {
            page.status = PageStatus::Completed;
            page.touch();
        }
    }

    /// Sends a notification through the session's channel, if any.
    pub fn notify(&self, notification: Notification) {
        if let Some(tx) = &self.notifications {
            let _ = tx.send(notification);
        }
    }

    /// Ends the session: stops autosave, then writes the page one last time.
    pub async fn close(mut self) -> EditorResult<Page> {
        self.autosaver.shutdown().await;
        self.autosaver.save_now(SaveReason::Autosave).await?;
        let page = self.snapshot().await;
        debug!(page = %page.id, "editing session closed");
        Ok(page)
    }
}
