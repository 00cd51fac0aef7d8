//! Worker-restart collaborator.
//!
//! When the worker stops accepting connections, the gateway asks an external
//! "porter" service to restart the worker container. The porter's transport
//! is deployment-specific, so the action sits behind a trait.

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum PorterError {
    #[error("porter request failed: {0}")]
    RequestFailed(String),
    #[error("porter error: {0}")]
    PorterFault(String),
}

/// Collaborator that can restart the worker container.
#[async_trait]
pub trait Porter: Send + Sync {
    /// Request a restart of the worker container. Best effort: callers log
    /// failures and carry on with their own retry schedule.
    async fn restart_worker(&self) -> Result<(), PorterError>;
}

/// Porter reached over HTTP.
pub struct HttpPorter {
    http_client: reqwest::Client,
    base_url: String,
    container: String,
}

impl HttpPorter {
    pub fn new(base_url: &str, container: &str) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            container: container.to_string(),
        }
    }
}

#[async_trait]
impl Porter for HttpPorter {
    async fn restart_worker(&self) -> Result<(), PorterError> {
        let url = format!("{}/containers/{}/update", self.base_url, self.container);

        let response = self
            .http_client
            .post(&url)
            .send()
            .await
            .map_err(|e| PorterError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PorterError::PorterFault(format!("{}: {}", status, body)));
        }

        tracing::info!("Requested restart of worker container {}", self.container);

        Ok(())
    }
}
