//! Sandbox relay client
//!
//! The sandbox execution engine itself is external; the orchestrator talks
//! to it through an HTTP relay. The trait seam keeps the queue's worker
//! pool testable without a live sandbox.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use autograde_core::domain::descriptor::ExecutionDescriptor;
use autograde_core::error::{CoreError, Result};

/// External sandbox execution engine
#[async_trait]
pub trait SandboxRunner: Send + Sync + 'static {
    /// Probes whether the sandbox relay can accept work
    async fn ready(&self) -> Result<()>;

    /// Runs one descriptor to completion, returning the raw report payload
    async fn run(&self, descriptor: &ExecutionDescriptor) -> Result<serde_json::Value>;
}

/// Sandbox relay reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpSandboxRunner {
    base_url: String,
    client: Client,
}

impl HttpSandboxRunner {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }
}

#[async_trait]
impl SandboxRunner for HttpSandboxRunner {
    async fn ready(&self) -> Result<()> {
        let url = format!("{}/health", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CoreError::DependencyUnavailable(format!("sandbox relay: {}", e)))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(CoreError::DependencyUnavailable(format!(
                "sandbox relay health returned {}",
                response.status()
            )))
        }
    }

    async fn run(&self, descriptor: &ExecutionDescriptor) -> Result<serde_json::Value> {
        let url = format!("{}/execute", self.base_url);
        debug!(
            "Dispatching {} @ {} to sandbox relay",
            descriptor.team_id, descriptor.push_info.commit
        );

        let response = self
            .client
            .post(&url)
            .json(descriptor)
            .send()
            .await
            .map_err(|e| CoreError::DependencyUnavailable(format!("sandbox relay: {}", e)))?;

        if !response.status().is_success() {
            return Err(CoreError::DependencyUnavailable(format!(
                "sandbox relay returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| CoreError::DependencyUnavailable(format!("sandbox report parse: {}", e)))
    }
}
