use std::collections::HashMap;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::models::annotate::Annotations;
use crate::ner::config::ModelConfig;

/// Metric name to value for one evaluation split.
pub type Metrics = HashMap<String, f64>;

/// Client for communicating with the NER worker runtime.
pub struct WorkerClient {
    http_client: Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct AnnotateWireRequest<'a> {
    x: &'a [String],
}

#[derive(Debug, Deserialize)]
struct TrainWireResponse {
    trained: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error("worker is unreachable: {0}")]
    Unreachable(String),
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),
    #[error("invalid worker response: {0}")]
    InvalidResponse(String),
    #[error("worker error: {0}")]
    WorkerFault(String),
}

impl WorkerClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Run the worker's entity annotator over a batch of texts.
    pub async fn annotate(&self, texts: &[String]) -> Result<Annotations, WorkerError> {
        let url = format!("{}/model", self.base_url);

        tracing::debug!("Annotating {} texts via {}", texts.len(), url);

        let response = self.send(&url, &AnnotateWireRequest { x: texts }).await?;
        let annotations: Annotations = response
            .json()
            .await
            .map_err(|e| WorkerError::InvalidResponse(e.to_string()))?;

        annotations
            .check_alignment(texts.len())
            .map_err(WorkerError::InvalidResponse)?;

        Ok(annotations)
    }

    /// Run the worker's training entry point with the given configuration.
    pub async fn train(&self, config: &ModelConfig) -> Result<(), WorkerError> {
        let url = format!("{}/train", self.base_url);

        tracing::debug!("Requesting training via {}", url);

        let response = self.send(&url, config).await?;
        let ack: TrainWireResponse = response
            .json()
            .await
            .map_err(|e| WorkerError::InvalidResponse(e.to_string()))?;

        if !ack.trained {
            return Err(WorkerError::WorkerFault(
                "worker reported training did not complete".to_string(),
            ));
        }

        Ok(())
    }

    /// Run the worker's evaluation entry point and return the metrics of the
    /// test split.
    pub async fn evaluate(&self, config: &ModelConfig) -> Result<Metrics, WorkerError> {
        let url = format!("{}/evaluate", self.base_url);

        tracing::debug!("Requesting evaluation via {}", url);

        let response = self.send(&url, config).await?;
        let mut report: HashMap<String, Metrics> = response
            .json()
            .await
            .map_err(|e| WorkerError::InvalidResponse(e.to_string()))?;

        report.remove("test").ok_or_else(|| {
            WorkerError::InvalidResponse("evaluation report has no test split".to_string())
        })
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<reqwest::Response, WorkerError> {
        let response = self
            .http_client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    WorkerError::Unreachable(e.to_string())
                } else {
                    WorkerError::RequestFailed(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(WorkerError::WorkerFault(format!("{}: {}", status, body)));
        }

        Ok(response)
    }
}
