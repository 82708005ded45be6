//! HTTP client for a remote generation backend.

use crate::error::{GenerationError, GenerationResult};
use crate::service::{GeneratedContent, GenerationRequest, GenerationService};
use async_trait::async_trait;
use funnelforge_types::Notification;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Configuration for the HTTP generation backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpGenerationConfig {
    /// Full URL the request is POSTed to.
    pub endpoint: String,
    /// Optional bearer token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for HttpGenerationConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8787/api/generate".to_string(),
            api_key: None,
            timeout_secs: 60,
        }
    }
}

/// [`GenerationService`] that forwards requests to a backend over HTTP.
///
/// Failures are not retried. Each one produces a single generic failure
/// notification; the detailed cause is logged and returned.
pub struct HttpGenerationClient {
    config: HttpGenerationConfig,
    client: Client,
    notifications: Option<mpsc::UnboundedSender<Notification>>,
}

impl HttpGenerationClient {
    pub fn new(
        config: HttpGenerationConfig,
        notifications: Option<mpsc::UnboundedSender<Notification>>,
    ) -> GenerationResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GenerationError::Service(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            config,
            client,
            notifications,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    async fn send(&self, request: &GenerationRequest) -> GenerationResult<GeneratedContent> {
        let mut builder = self.client.post(&self.config.endpoint).json(request);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| GenerationError::Service(format!("request failed: {e}")))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Service(format!(
                "backend returned {status}: {body}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| GenerationError::Service(format!("failed to read response: {e}")))?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl GenerationService for HttpGenerationClient {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn generate(&self, request: &GenerationRequest) -> GenerationResult<GeneratedContent> {
        debug!(endpoint = %self.config.endpoint, business = %request.business, "requesting generation");
        let result = self.send(request).await;
        if let Err(e) = &result {
            warn!("generation request failed: {e}");
            if let Some(tx) = &self.notifications {
                let _ = tx.send(e.to_notification());
            }
        }
        result
    }
}
