pub mod mock_worker;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::RwLock;

use crate::config::{
    Config, CorsConfig, LoggingConfig, PorterConfig, RetryConfig, WorkerConfig,
};
use crate::ner::{ModelConfig, NerModel};
use crate::porter::{Porter, PorterError};
use crate::retry::RetryPolicy;
use crate::worker::WorkerClient;
use crate::AppState;

pub fn test_config(worker_base_url: &str) -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 8000,
        worker: WorkerConfig {
            base_url: worker_base_url.to_string(),
            model_config_path: "ner_config.json".to_string(),
        },
        porter: PorterConfig {
            base_url: "http://localhost:8171".to_string(),
            container: "ner-worker".to_string(),
        },
        retry: RetryConfig {
            max_attempts: 3,
            initial_delay_ms: 1,
            max_delay_ms: 2,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
        },
        cors: CorsConfig {
            origins: "*".to_string(),
        },
    }
}

pub fn test_model_config() -> ModelConfig {
    serde_json::from_value(json!({
        "chainer": {"in": ["x"], "pipe": []},
        "metadata": {"MODEL_PATH": "models/ner"}
    }))
    .expect("test model config is valid")
}

/// Retry policy with delays short enough for tests.
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy::new(3, Duration::from_millis(1), Duration::from_millis(2))
}

/// Porter that counts restart requests instead of calling anything.
#[derive(Debug, Default)]
pub struct RecordingPorter {
    restarts: AtomicUsize,
}

impl RecordingPorter {
    pub fn restarts(&self) -> usize {
        self.restarts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Porter for RecordingPorter {
    async fn restart_worker(&self) -> Result<(), PorterError> {
        self.restarts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub fn create_test_state(worker_base_url: &str, porter: Arc<dyn Porter>) -> Arc<AppState> {
    let model = NerModel::new(
        WorkerClient::new(worker_base_url),
        test_model_config(),
        fast_retry(),
        porter,
    );

    Arc::new(AppState {
        config: test_config(worker_base_url),
        model: RwLock::new(model),
    })
}
