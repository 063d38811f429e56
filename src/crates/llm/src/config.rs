//! Configuration for the remote model endpoint.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tooling::config::{get_env_or, get_env_parse_or, get_env_secs_or, ConfigBuilder};
use tooling::ToolingError;

/// Default `generateContent` endpoint for Gemini.
pub const DEFAULT_GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

/// Configuration for a remote model provider.
#[derive(Clone, Serialize, Deserialize)]
pub struct RemoteLlmConfig {
    /// API key, sent as the `key` query parameter. May be empty when the
    /// endpoint URL already carries one.
    pub api_key: String,

    /// Full URL of the generation endpoint.
    pub api_url: String,

    /// Wall-clock budget for each attempt.
    #[serde(default = "default_timeout")]
    pub timeout: Duration,

    /// Additional attempts after the first one fails.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl RemoteLlmConfig {
    /// Create a configuration for the given key and endpoint.
    pub fn new(api_key: impl Into<String>, api_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: api_url.into(),
            timeout: default_timeout(),
            max_retries: default_max_retries(),
        }
    }

    /// Set the per-attempt timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the number of retries after the first attempt.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

impl Default for RemoteLlmConfig {
    fn default() -> Self {
        Self::new("", DEFAULT_GEMINI_API_URL)
    }
}

impl fmt::Debug for RemoteLlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteLlmConfig")
            .field("api_key", &if self.api_key.is_empty() { "" } else { "[REDACTED]" })
            .field("api_url", &tooling::logging::sanitize_for_logging(&self.api_url))
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl ConfigBuilder for RemoteLlmConfig {
    fn validate(&self) -> tooling::Result<()> {
        if self.api_url.trim().is_empty() {
            return Err(ToolingError::InvalidConfig(
                "model API URL must not be empty".to_string(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(ToolingError::InvalidConfig(
                "HTTP timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Reads `GEMINI_API_KEY`, `GEMINI_API_URL`, `HTTP_TIMEOUT_SECONDS` and
    /// `MAX_RETRIES`, each behind `prefix`.
    fn from_env(prefix: &str) -> tooling::Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            api_key: get_env_or(&format!("{}GEMINI_API_KEY", prefix), "")?,
            api_url: get_env_or(&format!("{}GEMINI_API_URL", prefix), defaults.api_url)?,
            timeout: get_env_secs_or(
                &format!("{}HTTP_TIMEOUT_SECONDS", prefix),
                defaults.timeout.as_secs(),
            )?,
            max_retries: get_env_parse_or(
                &format!("{}MAX_RETRIES", prefix),
                defaults.max_retries,
            )?,
        })
    }
}

fn default_timeout() -> Duration {
    Duration::from_secs(20)
}

fn default_max_retries() -> u32 {
    2
}
