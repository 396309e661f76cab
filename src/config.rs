use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Observability configuration
    pub observability: ObservabilityConfig,

    /// Model store and bootstrap configuration
    pub models: ModelConfig,

    /// Prediction engine configuration
    pub prediction: PredictionConfig,
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/default.toml".to_string());

        config::Config::builder()
            // Start with default values
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            // Override with config file if it exists
            .add_source(config::File::with_name(&config_path).required(false))
            // Override with environment variables (prefix: STAI)
            .add_source(
                config::Environment::with_prefix("STAI")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: default_host(),
                http_port: default_http_port(),
                request_timeout_secs: default_request_timeout(),
            },
            observability: ObservabilityConfig {
                log_level: default_log_level(),
                json_logs: false,
                service_name: default_service_name(),
            },
            models: ModelConfig {
                store_path: default_store_path(),
                bootstrap_samples: default_bootstrap_samples(),
                bootstrap_seed: default_bootstrap_seed(),
            },
            prediction: PredictionConfig {
                confidence_floor: default_confidence_floor(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// Request timeout (seconds)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub json_logs: bool,

    /// Service name
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Directory holding persisted model artifacts
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// Number of synthetic samples generated for bootstrap training
    #[serde(default = "default_bootstrap_samples")]
    pub bootstrap_samples: usize,

    /// RNG seed for synthetic bootstrap data
    #[serde(default = "default_bootstrap_seed")]
    pub bootstrap_seed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionConfig {
    /// Lower bound on the reported confidence level
    #[serde(default = "default_confidence_floor")]
    pub confidence_floor: f64,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_http_port() -> u16 {
    8001
}

fn default_request_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_service_name() -> String {
    "space-traffic-ai".to_string()
}

fn default_store_path() -> PathBuf {
    PathBuf::from("./data/models")
}

fn default_bootstrap_samples() -> usize {
    1000
}

fn default_bootstrap_seed() -> u64 {
    42
}

fn default_confidence_floor() -> f64 {
    70.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        assert_eq!(default_http_port(), 8001);
        assert_eq!(default_log_level(), "info");
        assert_eq!(default_bootstrap_seed(), 42);
        assert_eq!(default_confidence_floor(), 70.0);
    }

    #[test]
    fn test_default_config_struct() {
        let config = Config::default();
        assert_eq!(config.models.bootstrap_samples, 1000);
        assert_eq!(config.server.http_port, 8001);
    }
}
