//! Client configuration
//!
//! Loaded from YAML (a file or a string) or from the environment, then
//! converted into an [`HttpClientConfig`].
//!
//! ```yaml
//! api_url: https://api.example.com
//! token: eyJhbGciOi...
//! results_per_page: 100
//! http:
//!   timeout_seconds: 30
//!   max_retries: 3
//!   retry_backoff:
//!     type: exponential
//!     initial_ms: 100
//!     max_ms: 60000
//!   rate_limit:
//!     requests_per_second: 10
//!     burst_size: 10
//! ```

use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::types::{BackoffType, OptionStringExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the API root URL
pub const API_ENV: &str = "CF_API";

/// Environment variable holding the bearer token
pub const TOKEN_ENV: &str = "CF_TOKEN";

/// Largest page size the v2 API accepts
pub const MAX_RESULTS_PER_PAGE: u32 = 100;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Connection settings for one API endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// API root URL (e.g. `https://api.example.com`)
    pub api_url: String,

    /// Bearer token sent with every request
    #[serde(default)]
    pub token: Option<String>,

    /// Page size for list requests
    #[serde(default = "default_results_per_page")]
    pub results_per_page: u32,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpSettings,
}

fn default_results_per_page() -> u32 {
    50
}

impl Config {
    /// Config for `api_url` with default settings
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            token: None,
            results_per_page: default_results_per_page(),
            http: HttpSettings::default(),
        }
    }

    /// Load and validate a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Parse and validate YAML content
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Build from `CF_API` and `CF_TOKEN`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_url = lookup(API_ENV)
            .none_if_empty()
            .ok_or_else(|| Error::missing_field(API_ENV))?;

        let mut config = Self::new(api_url);
        config.fill_token(lookup);
        config.validate()?;
        Ok(config)
    }

    /// Take the token from `CF_TOKEN` when none is configured
    pub fn fill_token_from_env(&mut self) {
        self.fill_token(|key| std::env::var(key).ok());
    }

    pub(crate) fn fill_token(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if self.token.is_none() {
            self.token = lookup(TOKEN_ENV).none_if_empty();
        }
    }

    /// Check the settings are usable
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.api_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::validation(
                "api_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        if !(1..=MAX_RESULTS_PER_PAGE).contains(&self.results_per_page) {
            return Err(Error::validation(
                "results_per_page",
                format!("must be between 1 and {MAX_RESULTS_PER_PAGE}"),
            ));
        }

        if self.http.timeout_seconds == 0 {
            return Err(Error::validation("http.timeout_seconds", "must be positive"));
        }

        if self.http.retry_backoff.initial_ms > self.http.retry_backoff.max_ms {
            return Err(Error::validation(
                "http.retry_backoff",
                "initial_ms must not exceed max_ms",
            ));
        }

        Ok(())
    }

    /// HTTP client settings for this endpoint
    pub fn to_http_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(&self.api_url)
            .results_per_page(self.results_per_page)
            .timeout(Duration::from_secs(self.http.timeout_seconds))
            .max_retries(self.http.max_retries)
            .backoff(
                self.http.retry_backoff.backoff_type,
                Duration::from_millis(self.http.retry_backoff.initial_ms),
                Duration::from_millis(self.http.retry_backoff.max_ms),
            );

        if let Some(token) = &self.token {
            builder = builder.bearer_token(token);
        }

        builder = match &self.http.rate_limit {
            Some(limit) => builder.rate_limit(limit.clone()),
            None => builder.no_rate_limit(),
        };

        builder.build()
    }
}

// ============================================================================
// HTTP Settings
// ============================================================================

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Maximum number of retries
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Retry backoff configuration
    #[serde(default)]
    pub retry_backoff: BackoffConfig,

    /// Rate limiting; unset disables it
    #[serde(default = "default_rate_limit")]
    pub rate_limit: Option<RateLimiterConfig>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            retry_backoff: BackoffConfig::default(),
            rate_limit: default_rate_limit(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_rate_limit() -> Option<RateLimiterConfig> {
    Some(RateLimiterConfig::default())
}

/// Backoff configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Type of backoff
    #[serde(rename = "type", default)]
    pub backoff_type: BackoffType,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_ms")]
    pub initial_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::Exponential,
            initial_ms: default_initial_ms(),
            max_ms: default_max_ms(),
        }
    }
}

fn default_initial_ms() -> u64 {
    100
}

fn default_max_ms() -> u64 {
    60000
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_minimal_yaml() {
        let config = Config::from_yaml_str("api_url: https://api.example.com\n").unwrap();

        assert_eq!(config, Config::new("https://api.example.com"));
        assert_eq!(config.results_per_page, 50);
        assert!(config.http.rate_limit.is_some());
    }

    #[test]
    fn test_config_full_yaml() {
        let yaml = r"
api_url: https://api.example.com
token: secret
results_per_page: 100
http:
  timeout_seconds: 5
  max_retries: 1
  retry_backoff:
    type: linear
    initial_ms: 10
    max_ms: 20
  rate_limit: null
";
        let config = Config::from_yaml_str(yaml).unwrap();

        assert_eq!(config.token.as_deref(), Some("secret"));
        assert_eq!(config.http.retry_backoff.backoff_type, BackoffType::Linear);
        assert!(config.http.rate_limit.is_none());

        let http = config.to_http_config();
        assert_eq!(http.base_url.as_deref(), Some("https://api.example.com"));
        assert_eq!(http.bearer_token.as_deref(), Some("secret"));
        assert_eq!(http.results_per_page, Some(100));
        assert_eq!(http.timeout, Duration::from_secs(5));
        assert_eq!(http.max_retries, 1);
        assert_eq!(http.initial_backoff, Duration::from_millis(10));
        assert!(http.rate_limit.is_none());
    }

    #[test]
    fn test_config_rejects_page_size() {
        for size in [0, 101] {
            let yaml = format!("api_url: https://api.example.com\nresults_per_page: {size}\n");
            let err = Config::from_yaml_str(&yaml).unwrap_err();
            assert!(matches!(err, Error::Validation { ref field, .. } if field == "results_per_page"));
        }
    }

    #[test]
    fn test_config_rejects_bad_url() {
        assert!(matches!(
            Config::from_yaml_str("api_url: not a url\n").unwrap_err(),
            Error::InvalidUrl(_)
        ));
        assert!(matches!(
            Config::from_yaml_str("api_url: ftp://api.example.com\n").unwrap_err(),
            Error::Validation { .. }
        ));
    }

    #[test]
    fn test_config_missing_api_url() {
        let err = Config::from_yaml_str("token: x\n").unwrap_err();
        assert!(matches!(err, Error::YamlParse(_)));
    }

    #[test]
    fn test_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "api_url: http://localhost:8080").unwrap();
        writeln!(file, "results_per_page: 10").unwrap();

        let config = Config::from_file(file.path()).unwrap();

        assert_eq!(config.api_url, "http://localhost:8080");
        assert_eq!(config.results_per_page, 10);
    }

    #[test]
    fn test_config_from_missing_file() {
        let err = Config::from_file("/nonexistent/cf-ops.yaml").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_fill_token_ignores_empty_value() {
        let mut config = Config::new("https://api.example.com");
        config.fill_token(|_| Some(String::new()));
        assert!(config.token.is_none());

        config.fill_token(|_| Some("from-env".to_string()));
        assert_eq!(config.token.as_deref(), Some("from-env"));

        config.fill_token(|_| Some("ignored".to_string()));
        assert_eq!(config.token.as_deref(), Some("from-env"));
    }

    #[test]
    fn test_config_from_lookup() {
        let config = Config::from_lookup(|key| match key {
            API_ENV => Some("https://api.example.com".to_string()),
            TOKEN_ENV => Some(String::new()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.api_url, "https://api.example.com");
        assert!(config.token.is_none());

        let err = Config::from_lookup(|_| None).unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { .. }));
    }
}
