use std::env;
use std::time::Duration;

use crate::retry::RetryPolicy;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host (default: 0.0.0.0)
    pub host: String,
    /// Server port (default: 8000)
    pub port: u16,
    pub worker: WorkerConfig,
    pub porter: PorterConfig,
    pub retry: RetryConfig,
    pub logging: LoggingConfig,
    pub cors: CorsConfig,
}

/// NER worker runtime settings.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Base URL of the worker (default: http://localhost:8170)
    pub base_url: String,
    /// Path to the model configuration JSON loaded at startup.
    pub model_config_path: String,
}

/// Porter service settings (worker container restarts).
#[derive(Debug, Clone)]
pub struct PorterConfig {
    /// Base URL of the porter service (default: http://localhost:8171)
    pub base_url: String,
    /// Name of the worker container the porter manages.
    pub container: String,
}

/// Retry behavior for worker calls that fail at the connection level.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_attempts,
            Duration::from_millis(self.initial_delay_ms),
            Duration::from_millis(self.max_delay_ms),
        )
    }
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub origins: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PORT"))?,
            worker: WorkerConfig {
                base_url: env::var("WORKER_BASE_URL")
                    .unwrap_or_else(|_| "http://localhost:8170".to_string()),
                model_config_path: env::var("MODEL_CONFIG_PATH")
                    .unwrap_or_else(|_| "ner_config.json".to_string()),
            },
            porter: PorterConfig {
                base_url: env::var("PORTER_BASE_URL")
                    .unwrap_or_else(|_| "http://localhost:8171".to_string()),
                container: env::var("WORKER_CONTAINER")
                    .unwrap_or_else(|_| "ner-worker".to_string()),
            },
            retry: RetryConfig {
                max_attempts: env::var("RETRY_MAX_ATTEMPTS")
                    .unwrap_or_else(|_| "3".to_string())
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("RETRY_MAX_ATTEMPTS"))?,
                initial_delay_ms: env::var("RETRY_INITIAL_DELAY_MS")
                    .unwrap_or_else(|_| "500".to_string())
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("RETRY_INITIAL_DELAY_MS"))?,
                max_delay_ms: env::var("RETRY_MAX_DELAY_MS")
                    .unwrap_or_else(|_| "5000".to_string())
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("RETRY_MAX_DELAY_MS"))?,
            },
            logging: LoggingConfig {
                level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            },
            cors: CorsConfig {
                origins: env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string()),
            },
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_config_converts_to_policy() {
        let retry = RetryConfig {
            max_attempts: 4,
            initial_delay_ms: 250,
            max_delay_ms: 2000,
        };
        let policy = retry.policy();
        assert_eq!(policy.max_attempts, 4);
        assert_eq!(policy.initial_delay, Duration::from_millis(250));
        assert_eq!(policy.max_delay, Duration::from_millis(2000));
    }
}
