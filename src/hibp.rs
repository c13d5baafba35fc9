//! Have I Been Pwned range client and its configuration.

use std::time::Duration;

use reqwest::blocking::Client;
use thiserror::Error;

use crate::breach::{BreachError, RangeSource};

pub const DEFAULT_API_URL: &str = "https://api.pwnedpasswords.com/range/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_USER_AGENT: &str = concat!("pwd-nist-check/", env!("CARGO_PKG_VERSION"));

pub const API_URL_ENV: &str = "PWD_HIBP_URL";
pub const TIMEOUT_ENV: &str = "PWD_HIBP_TIMEOUT_SECS";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must not be empty")]
    EmptyUrl(&'static str),
    #[error("{0} must be a positive number of seconds, got {1:?}")]
    InvalidTimeout(&'static str, String),
}

/// Where and how the range API is queried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HibpConfig {
    /// Prefix the 5 character hash prefix is appended to.
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
    /// Ask the API to pad responses with decoy records.
    pub add_padding: bool,
}

impl Default for HibpConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            add_padding: true,
        }
    }
}

impl HibpConfig {
    /// Builds the configuration from the environment.
    ///
    /// Priority:
    /// 1. Environment variables `PWD_HIBP_URL` and `PWD_HIBP_TIMEOUT_SECS`
    /// 2. Defaults (public API, 5 seconds)
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but empty or not a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var(API_URL_ENV) {
            let url = url.trim();
            if url.is_empty() {
                return Err(ConfigError::EmptyUrl(API_URL_ENV));
            }
            config.base_url = url.to_string();
        }

        if let Ok(secs) = std::env::var(TIMEOUT_ENV) {
            let parsed = secs
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout(TIMEOUT_ENV, secs.clone()))?;
            config.timeout = Duration::from_secs(parsed);
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_padding(mut self, add_padding: bool) -> Self {
        self.add_padding = add_padding;
        self
    }

    /// Full URL for one range query.
    pub fn range_url(&self, prefix: &str) -> String {
        format!("{}{}", self.base_url, prefix)
    }
}

/// Blocking HTTPS client for the range API. Single attempt per query, bounded
/// by the configured timeout.
///
/// Must not be created or used from inside an async runtime; see
/// [`evaluate_tx`](crate::evaluate_tx) for that.
#[derive(Debug, Clone)]
pub struct HibpClient {
    config: HibpConfig,
    client: Client,
}

impl HibpClient {
    pub fn new(config: HibpConfig) -> Result<Self, BreachError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &HibpConfig {
        &self.config
    }
}

impl RangeSource for HibpClient {
    fn fetch_range(&self, prefix: &str) -> Result<String, BreachError> {
        let mut request = self.client.get(self.config.range_url(prefix));
        if self.config.add_padding {
            request = request.header("Add-Padding", "true");
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            #[cfg(feature = "tracing")]
            tracing::warn!("Range API responded with status {}", status);
            return Err(BreachError::Service(status.as_u16()));
        }

        Ok(response.text()?)
    }
}
