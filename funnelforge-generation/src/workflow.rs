//! Timed playback of generation stages.
//!
//! The workflow is strictly sequential: wait the stage delay, mark the stage
//! complete, report progress, move on. No branching, no retries, no
//! cancellation. Progress is `completed * 100 / total`, so 100 is reported
//! exactly once, after the last stage.

use funnelforge_types::Notification;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Stage names played back by default.
pub const DEFAULT_STAGES: [&str; 5] = [
    "Analyzing your business",
    "Researching your audience",
    "Writing persuasive copy",
    "Designing your pages",
    "Composing your email sequence",
];

/// Configuration for the generation workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub stages: Vec<String>,
    /// Delay before each stage completes (ms).
    pub stage_delay_ms: u64,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            stages: DEFAULT_STAGES.iter().map(|s| s.to_string()).collect(),
            stage_delay_ms: 1_500,
        }
    }
}

/// Progress after one stage has completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageProgress {
    /// Zero-based index of the stage that just completed.
    pub index: usize,
    pub stage: String,
    /// 0..=100.
    pub percent: u8,
}

#[derive(Debug, Clone, Default)]
pub struct GenerationWorkflow {
    config: WorkflowConfig,
}

impl GenerationWorkflow {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    pub fn stages(&self) -> &[String] {
        &self.config.stages
    }

    pub fn stage_delay(&self) -> Duration {
        Duration::from_millis(self.config.stage_delay_ms)
    }

    /// Total time a full run takes, saturating at `Duration::MAX`.
    pub fn total_duration(&self) -> Duration {
        let stages = u32::try_from(self.config.stages.len()).unwrap_or(u32::MAX);
        self.stage_delay().saturating_mul(stages)
    }

    /// Progress after `completed` of `total` stages.
    pub fn percent_after(completed: usize, total: usize) -> u8 {
        if total == 0 {
            return 100;
        }
        (completed.min(total) * 100 / total) as u8
    }

    /// Plays back every stage in order. `on_progress` is called after each
    /// stage, and each stage also emits an info notification.
    pub async fn run(
        &self,
        notifications: Option<&mpsc::UnboundedSender<Notification>>,
        mut on_progress: impl FnMut(&StageProgress),
    ) -> Vec<StageProgress> {
        let total = self.config.stages.len();
        let delay = self.stage_delay();
        let mut history = Vec::with_capacity(total);

        info!(stages = total, delay_ms = self.config.stage_delay_ms, "generation started");
        for (index, stage) in self.config.stages.iter().enumerate() {
            tokio::time::sleep(delay).await;
            let progress = StageProgress {
                index,
                stage: stage.clone(),
                percent: Self::percent_after(index + 1, total),
            };
            debug!(stage = %progress.stage, percent = progress.percent, "stage complete");
            if let Some(tx) = notifications {
                let _ = tx.send(
                    Notification::info(stage.clone())
                        .with_description(format!("{}% complete", progress.percent)),
                );
            }
            on_progress(&progress);
            history.push(progress);
        }
        info!("generation finished");
        history
    }
}
