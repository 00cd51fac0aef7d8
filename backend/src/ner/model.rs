//! The loaded model, as an explicit shared resource.
//!
//! One `NerModel` is built at startup and lives in `AppState` behind a
//! `tokio::sync::RwLock`: annotation takes the read guard, training and
//! evaluation take the write guard, so a training run never overlaps with
//! in-flight inference.

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use crate::models::annotate::Annotations;
use crate::ner::config::ModelConfig;
use crate::porter::Porter;
use crate::retry::RetryPolicy;
use crate::worker::{Metrics, WorkerClient, WorkerError};

pub struct NerModel {
    client: WorkerClient,
    /// Base toolkit configuration loaded at startup. Never mutated; each
    /// training or evaluation call derives its own copy.
    base_config: ModelConfig,
    retry: RetryPolicy,
    porter: Arc<dyn Porter>,
}

impl NerModel {
    pub fn new(
        client: WorkerClient,
        base_config: ModelConfig,
        retry: RetryPolicy,
        porter: Arc<dyn Porter>,
    ) -> Self {
        Self {
            client,
            base_config,
            retry,
            porter,
        }
    }

    pub fn base_config(&self) -> &ModelConfig {
        &self.base_config
    }

    /// Annotate a batch of texts with detected entities.
    pub async fn annotate(&self, texts: &[String]) -> Result<Annotations, WorkerError> {
        self.with_worker_restart(|| self.client.annotate(texts))
            .await
    }

    /// Train the model on a rewritten dataset file. The derived configuration
    /// reads from `dataset_path` and writes the trained model next to the
    /// pretrained one.
    pub async fn train(&mut self, dataset_path: &Path) -> Result<(), WorkerError> {
        let config = self
            .base_config
            .with_dataset(dataset_path)
            .with_new_model_path();
        self.with_worker_restart(|| self.client.train(&config))
            .await
    }

    /// Evaluate the model on a rewritten dataset file and return the metrics
    /// of the test split.
    pub async fn evaluate(&mut self, dataset_path: &Path) -> Result<Metrics, WorkerError> {
        let config = self.base_config.with_dataset(dataset_path);
        self.with_worker_restart(|| self.client.evaluate(&config))
            .await
    }

    /// Run a worker call under the retry policy. Each connection-level
    /// failure triggers a porter restart request for the worker container;
    /// after the final attempt the error is returned to the caller. Other
    /// worker errors are never retried.
    async fn with_worker_restart<T, Fut, F>(&self, mut call: F) -> Result<T, WorkerError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, WorkerError>>,
    {
        let mut attempt: u32 = 1;
        loop {
            match call().await {
                Ok(value) => return Ok(value),
                Err(WorkerError::Unreachable(reason)) => {
                    tracing::warn!(
                        attempt,
                        max_attempts = self.retry.max_attempts,
                        "Worker is unreachable ({}), requesting container restart",
                        reason
                    );
                    if let Err(e) = self.porter.restart_worker().await {
                        tracing::warn!("Porter restart request failed: {}", e);
                    }

                    if attempt >= self.retry.max_attempts {
                        return Err(WorkerError::Unreachable(reason));
                    }
                    tokio::time::sleep(self.retry.delay_after(attempt)).await;
                    attempt += 1;
                }
                Err(other) => return Err(other),
            }
        }
    }
}
