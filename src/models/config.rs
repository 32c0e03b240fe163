//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP and API behavior settings
    #[serde(default)]
    pub client: ClientConfig,

    /// Output location settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(&path) {
            Ok(config) => {
                log::info!("Loaded configuration from {}", path.as_ref().display());
                config
            }
            Err(e) => {
                log::warn!(
                    "Config load failed from {:?}: {}. Using defaults.",
                    path.as_ref(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.client.user_agent.trim().is_empty() {
            return Err(AppError::validation("client.user_agent is empty"));
        }
        if self.client.timeout_secs == 0 {
            return Err(AppError::validation("client.timeout_secs must be > 0"));
        }
        if self.client.max_concurrent == 0 {
            return Err(AppError::validation("client.max_concurrent must be > 0"));
        }
        if self.client.board_host.trim().is_empty() {
            return Err(AppError::validation("client.board_host is empty"));
        }
        url::Url::parse(&self.client.api_url)?;
        if self.output.dir.trim().is_empty() {
            return Err(AppError::validation("output.dir is empty"));
        }
        Ok(())
    }
}

/// HTTP client and API behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// GraphQL endpoint of the job-board platform
    #[serde(default = "defaults::api_url")]
    pub api_url: String,

    /// Host serving the public job boards (`{host}/{organization}`)
    #[serde(default = "defaults::board_host")]
    pub board_host: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Minimum spacing between detail fetches in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,

    /// Maximum detail fetches in flight per organization
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: defaults::api_url(),
            board_host: defaults::board_host(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            request_delay_ms: defaults::request_delay(),
            max_concurrent: defaults::max_concurrent(),
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving `dataset.json` and `stats.json`
    #[serde(default = "defaults::output_dir")]
    pub dir: String,

    /// Pretty-print written JSON
    #[serde(default = "defaults::pretty")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: defaults::output_dir(),
            pretty: defaults::pretty(),
        }
    }
}

mod defaults {
    // Client defaults
    pub fn api_url() -> String {
        "https://jobs.ashbyhq.com/api/non-user-graphql".into()
    }
    pub fn board_host() -> String {
        "jobs.ashbyhq.com".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; jobs-crawler/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn request_delay() -> u64 {
        100
    }
    pub fn max_concurrent() -> usize {
        1
    }

    // Output defaults
    pub fn output_dir() -> String {
        "storage".into()
    }
    pub fn pretty() -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.client.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_concurrency() {
        let mut config = Config::default();
        config.client.max_concurrent = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_api_url() {
        let mut config = Config::default();
        config.client.api_url = "not a url".to_string();
        assert!(matches!(config.validate(), Err(AppError::Url(_))));
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [client]
            request_delay_ms = 250
            "#,
        )
        .unwrap();
        assert_eq!(config.client.request_delay_ms, 250);
        assert_eq!(config.client.board_host, "jobs.ashbyhq.com");
        assert_eq!(config.client.max_concurrent, 1);
        assert_eq!(config.output.dir, "storage");
    }

    #[test]
    fn load_or_default_falls_back_on_missing_file() {
        let config = Config::load_or_default("/definitely/not/here/config.toml");
        assert_eq!(config.client.timeout_secs, 30);
    }

    #[test]
    fn load_or_default_reads_existing_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[client]\ntimeout_secs = 5\n").unwrap();

        let config = Config::load_or_default(&path);
        assert_eq!(config.client.timeout_secs, 5);
    }
}
