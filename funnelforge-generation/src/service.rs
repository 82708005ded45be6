//! The generation seam: one trait, a simulated implementation and the
//! orchestration shared by every front end.

use crate::error::GenerationResult;
use crate::profile::BusinessProfile;
use crate::templates::{synthesize, FunnelBlueprint};
use crate::workflow::{GenerationWorkflow, StageProgress};
use async_trait::async_trait;
use funnelforge_types::Notification;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::warn;

/// What is sent to a generation backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub business: String,
    pub topic: String,
    pub audience: String,
    pub goal: String,
}

impl From<&BusinessProfile> for GenerationRequest {
    fn from(profile: &BusinessProfile) -> Self {
        let topic = if profile.topic.trim().is_empty() {
            profile.industry.clone()
        } else {
            profile.topic.clone()
        };
        Self {
            business: profile.business_name.clone(),
            topic,
            audience: profile.target_audience.clone(),
            goal: profile.goal.clone(),
        }
    }
}

/// What a generation backend answers with. Consumed as opaque JSON for
/// display; missing sections default to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratedContent {
    pub content_blocks: Vec<Value>,
    pub landing_page: Value,
    pub email_sequence: Vec<Value>,
}

/// Produces marketing copy for a request.
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Human-readable backend name, for logs.
    fn name(&self) -> &'static str;

    async fn generate(&self, request: &GenerationRequest) -> GenerationResult<GeneratedContent>;
}

/// Validate → play back stages → synthesize, reporting through notifications.
#[derive(Debug, Clone, Default)]
pub struct FunnelGenerator {
    workflow: GenerationWorkflow,
    notifications: Option<mpsc::UnboundedSender<Notification>>,
}

impl FunnelGenerator {
    pub fn new(
        workflow: GenerationWorkflow,
        notifications: Option<mpsc::UnboundedSender<Notification>>,
    ) -> Self {
        Self {
            workflow,
            notifications,
        }
    }

    pub fn workflow(&self) -> &GenerationWorkflow {
        &self.workflow
    }

    /// Runs the full simulated generation for `profile`.
    ///
    /// Validation failures are reported before any stage runs.
    pub async fn generate(
        &self,
        profile: &BusinessProfile,
        on_progress: impl FnMut(&StageProgress),
    ) -> GenerationResult<FunnelBlueprint> {
        if let Err(e) = profile.validate() {
            warn!("generation blocked: {e}");
            self.notify(e.to_notification());
            return Err(e);
        }
        self.workflow
            .run(self.notifications.as_ref(), on_progress)
            .await;
        let blueprint = synthesize(profile);
        self.notify(
            Notification::success("Your funnel is ready")
                .with_description(format!("\"{}\" was generated.", blueprint.name)),
        );
        Ok(blueprint)
    }

    fn notify(&self, notification: Notification) {
        if let Some(tx) = &self.notifications {
            let _ = tx.send(notification);
        }
    }
}

/// [`GenerationService`] backed by the local simulation.
#[derive(Debug, Clone, Default)]
pub struct SimulatedGenerationService {
    generator: FunnelGenerator,
}

impl SimulatedGenerationService {
    pub fn new(generator: FunnelGenerator) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl GenerationService for SimulatedGenerationService {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn generate(&self, request: &GenerationRequest) -> GenerationResult<GeneratedContent> {
        let profile = BusinessProfile {
            business_name: request.business.clone(),
            industry: request.topic.clone(),
            target_audience: request.audience.clone(),
            goal: request.goal.clone(),
            topic: request.topic.clone(),
            tone: String::new(),
        };
        let blueprint = self.generator.generate(&profile, |_| {}).await?;
        Ok(blueprint.to_generated_content())
    }
}
