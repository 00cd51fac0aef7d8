pub mod config;
pub mod model;

pub use config::{ModelConfig, ModelConfigError};
pub use model::NerModel;
