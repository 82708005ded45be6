//! Periodic background persistence of the page being edited.
//!
//! The autosave task is owned by its [`Autosaver`] handle: `shutdown()`
//! stops it and waits for any in-flight write, and dropping the handle
//! aborts it. Once either has happened the task writes nothing more.
//!
//! Saves from the task and from [`Autosaver::save_now`] are serialized: each
//! one snapshots and writes while holding the same lock, so a write never
//! lands after a newer snapshot's write.

use crate::error::{StorageError, StorageResult};
use crate::repository::{PageRepository, SaveKind};
use funnelforge_model::Page;
use funnelforge_types::Notification;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// The page shared between an editing session and its autosave task.
pub type SharedPage = Arc<RwLock<Page>>;

/// Configuration for autosave.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AutosaveConfig {
    /// Seconds between automatic saves.
    pub interval_secs: u64,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self { interval_secs: 10 }
    }
}

impl AutosaveConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

/// Why a save happened. Decides which notification the user sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveReason {
    Autosave,
    Manual,
    Publish,
}

/// Handle to a running autosave task.
pub struct Autosaver {
    repo: Arc<PageRepository>,
    page: SharedPage,
    notifications: Option<mpsc::UnboundedSender<Notification>>,
    save_lock: Arc<Mutex<()>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl Autosaver {
    /// Starts saving `page` through `repo` every `config.interval()`.
    /// The first automatic save happens one interval after start.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(
        repo: Arc<PageRepository>,
        page: SharedPage,
        config: AutosaveConfig,
        notifications: Option<mpsc::UnboundedSender<Notification>>,
    ) -> Self {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let period = config.interval();
        let save_lock = Arc::new(Mutex::new(()));

        let saver = Saver {
            repo: Arc::clone(&repo),
            page: Arc::clone(&page),
            notifications: notifications.clone(),
            save_lock: Arc::clone(&save_lock),
        };
        let task = tokio::spawn(async move {
            run_loop(saver, period, shutdown_rx).await;
        });

        info!(interval_secs = period.as_secs(), "autosave started");
        Self {
            repo,
            page,
            notifications,
            save_lock,
            shutdown_tx: Some(shutdown_tx),
            task: Some(task),
        }
    }

    /// Saves the current page immediately. Waits for an in-flight save first.
    pub async fn save_now(&self, reason: SaveReason) -> StorageResult<SaveKind> {
        persist(
            &self.repo,
            &self.page,
            self.notifications.as_ref(),
            &self.save_lock,
            reason,
        )
        .await
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stops the task and waits for it to finish.
    pub async fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!("autosave task ended abnormally: {e}");
            }
            info!("autosave stopped");
        }
    }
}

impl Drop for Autosaver {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// What the background task needs to save.
struct Saver {
    repo: Arc<PageRepository>,
    page: SharedPage,
    notifications: Option<mpsc::UnboundedSender<Notification>>,
    save_lock: Arc<Mutex<()>>,
}

async fn run_loop(saver: Saver, period: Duration, mut shutdown_rx: oneshot::Receiver<()>) {
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown_rx => break,
            _ = ticker.tick() => {
                // Failures are already reported through `persist`.
                let _ = persist(
                    &saver.repo,
                    &saver.page,
                    saver.notifications.as_ref(),
                    &saver.save_lock,
                    SaveReason::Autosave,
                )
                .await;
            }
        }
    }
}

async fn persist(
    repo: &Arc<PageRepository>,
    page: &SharedPage,
    notifications: Option<&mpsc::UnboundedSender<Notification>>,
    save_lock: &Mutex<()>,
    reason: SaveReason,
) -> StorageResult<SaveKind> {
    let _guard = save_lock.lock().await;
    let snapshot = page.read().await.clone();
    let page_id = snapshot.id.clone();
    let repo = Arc::clone(repo);
    let result = tokio::task::spawn_blocking(move || repo.save(&snapshot))
        .await
        .map_err(|e| StorageError::Task(e.to_string()))
        .and_then(|r| r);

    let notification = match (&result, reason) {
        (Ok(_), SaveReason::Autosave) => {
            debug!(page = %page_id, "autosaved");
            None
        }
        (Ok(_), SaveReason::Manual) => Some(Notification::success("Page saved")),
        (Ok(_), SaveReason::Publish) => Some(
            Notification::success("Page published").with_description("Your page is now live."),
        ),
        (Err(e), _) => {
            warn!(page = %page_id, ?reason, "save failed: {e}");
            Some(Notification::error("Save failed").with_description(e.to_string()))
        }
    };
    if let (Some(tx), Some(notification)) = (notifications, notification) {
        let _ = tx.send(notification);
    }
    result
}
