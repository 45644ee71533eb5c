use serde::{Deserialize, Serialize};

use super::api::ApiConfig;
use super::cache::CacheConfig;
use super::drafts::DraftsConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::polling::PollingConfig;
use super::retry::RetryConfig;

const LOCAL_CONFIG_PATH: &str = "votewatch.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/votewatch/config.toml";

/// Main configuration structure for Votewatch
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Backend API location and request bounds
    #[serde(default)]
    pub api: ApiConfig,

    /// Dashboard refresh behaviour
    #[serde(default)]
    pub polling: PollingConfig,

    /// Retry policy for failed fetches
    #[serde(default)]
    pub retry: RetryConfig,

    /// Query cache garbage collection
    #[serde(default)]
    pub cache: CacheConfig,

    /// Persisted form drafts
    #[serde(default)]
    pub drafts: DraftsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. votewatch.toml in current directory
    /// 3. /etc/votewatch/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(url) = overrides.api_url {
            self.api.base_url = url;
        }
        if let Some(token) = overrides.auth_token {
            self.api.auth_token = Some(token);
        }
        if let Some(interval) = overrides.poll_interval_ms {
            self.polling.interval_ms = interval;
        }
        if let Some(db) = overrides.drafts_database {
            self.drafts.database_path = db;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "API base URL cannot be empty".to_string(),
            ));
        }

        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            return Err(ConfigError::Validation(format!(
                "API base URL '{}' must use http or https",
                self.api.base_url
            )));
        }

        if self.api.request_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Request timeout cannot be 0".to_string(),
            ));
        }

        if self.polling.interval_ms == 0 {
            return Err(ConfigError::Validation(
                "Polling interval cannot be 0".to_string(),
            ));
        }

        if self.polling.page_size == 0 {
            return Err(ConfigError::Validation("Page size cannot be 0".to_string()));
        }

        if self.retry.max_attempts == 0 {
            return Err(ConfigError::Validation(
                "Retry policy needs at least one attempt".to_string(),
            ));
        }

        if self.retry.base_delay_ms > self.retry.max_delay_ms {
            return Err(ConfigError::Validation(format!(
                "Retry base delay {} ms exceeds max delay {} ms",
                self.retry.base_delay_ms, self.retry.max_delay_ms
            )));
        }

        Ok(())
    }

    pub fn save(&self, path: &str) -> Result<(), ConfigError> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, toml_string)
            .map_err(|e| ConfigError::FileWrite(path.to_string(), e.to_string()))?;
        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub api_url: Option<String>,
    pub auth_token: Option<String>,
    pub poll_interval_ms: Option<u64>,
    pub drafts_database: Option<String>,
    pub log_level: Option<String>,
}
