//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::HttpBackendConfig;
use crate::state::{Timings, DEFAULT_TEST_SIZE_PERCENT};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub timings: TimingsConfig,

    #[serde(default)]
    pub training: TrainingConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Prediction service connection
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Unset means no timeout; training can take a while
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

impl BackendConfig {
    pub fn http(&self) -> HttpBackendConfig {
        HttpBackendConfig {
            base_url: self.base_url.clone(),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Fixed UI delays
#[derive(Debug, Clone, Deserialize)]
pub struct TimingsConfig {
    #[serde(default = "default_message_hide")]
    pub message_hide_ms: u64,

    #[serde(default = "default_login_redirect")]
    pub login_redirect_ms: u64,

    #[serde(default = "default_registration_reset")]
    pub registration_reset_ms: u64,
}

fn default_message_hide() -> u64 {
    5000
}

fn default_login_redirect() -> u64 {
    1000
}

fn default_registration_reset() -> u64 {
    2000
}

impl Default for TimingsConfig {
    fn default() -> Self {
        Self {
            message_hide_ms: default_message_hide(),
            login_redirect_ms: default_login_redirect(),
            registration_reset_ms: default_registration_reset(),
        }
    }
}

impl TimingsConfig {
    pub fn timings(&self) -> Timings {
        Timings {
            message_hide: Duration::from_millis(self.message_hide_ms),
            login_redirect: Duration::from_millis(self.login_redirect_ms),
            registration_reset: Duration::from_millis(self.registration_reset_ms),
        }
    }
}

/// Training defaults
#[derive(Debug, Clone, Deserialize)]
pub struct TrainingConfig {
    #[serde(default = "default_test_size")]
    pub test_size_percent: u8,
}

fn default_test_size() -> u8 {
    DEFAULT_TEST_SIZE_PERCENT
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            test_size_percent: default_test_size(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("cropyield").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("CROPYIELD_BACKEND_URL") {
            self.backend.base_url = url;
        }
        if let Ok(timeout) = std::env::var("CROPYIELD_REQUEST_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse() {
                self.backend.request_timeout_secs = Some(secs);
            }
        }

        if let Ok(level) = std::env::var("CROPYIELD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("CROPYIELD_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Cropyield Configuration
#
# Environment variables override these settings:
# - CROPYIELD_BACKEND_URL
# - CROPYIELD_REQUEST_TIMEOUT_SECS
# - CROPYIELD_LOG_LEVEL
# - CROPYIELD_LOG_FORMAT

[backend]
# Prediction service URL
base_url = "http://127.0.0.1:5000"

# Request timeout in seconds (leave unset to wait for long training runs)
# request_timeout_secs = 300

[timings]
# How long status messages stay visible (ms)
message_hide_ms = 5000

# Delay before redirecting after a successful login (ms)
login_redirect_ms = 1000

# Delay before returning to the login form after registering (ms)
registration_reset_ms = 2000

[training]
# Share of the dataset held out for evaluation (percent)
test_size_percent = 20

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty or json
format = "pretty"
"#
    .to_string()
}
