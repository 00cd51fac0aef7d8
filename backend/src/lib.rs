pub mod config;
pub mod dataset;
pub mod error;
pub mod models;
pub mod ner;
pub mod porter;
pub mod retry;
pub mod routes;
pub mod test_util;
pub mod worker;

pub use config::Config;
pub use error::ApiError;
pub use ner::{ModelConfig, NerModel};
pub use porter::{HttpPorter, Porter};
pub use retry::RetryPolicy;
pub use worker::WorkerClient;

use tokio::sync::RwLock;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    /// The loaded model. Annotation takes the read guard; training and
    /// evaluation take the write guard.
    pub model: RwLock<NerModel>,
}
