use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::retry::RetryConfig;

/// Default protocol version sent with state manager proof requests.
const DEFAULT_STATE_MANAGER_VERSION: &str = "0.0.1-dev-3e607237";

/// Connection settings for the external state manager service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateManagerConfig {
    /// JSON-RPC endpoint URL.
    pub endpoint: String,

    /// Protocol version the client expects the service to speak.
    #[serde(default = "default_state_manager_version")]
    pub version: String,

    /// Retry policy applied to every request.
    #[serde(default)]
    pub request_retry: RetryConfig,
}

fn default_state_manager_version() -> String {
    DEFAULT_STATE_MANAGER_VERSION.to_owned()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Service label to append to the service name (e.g., "prod", "dev").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_label: Option<String>,

    /// Directory path for file-based logging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,

    /// Prefix for log file names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file_prefix: Option<String>,

    /// Use JSON format for logs instead of compact format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_format: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub state_manager: StateManagerConfig,

    /// Logging configuration (optional section in TOML).
    #[serde(default)]
    pub logging: LoggingConfig,
}
