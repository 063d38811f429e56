//! Server configuration
//!
//! Everything is read from the environment once at startup:
//!
//! | Variable | Default |
//! |---|---|
//! | `GEMINI_API_KEY` | empty |
//! | `GEMINI_API_URL` | Gemini `generateContent` endpoint |
//! | `HTTP_TIMEOUT_SECONDS` | `20` (model and tool calls) |
//! | `MAX_RETRIES` | `2` (model calls only) |
//! | `NOTE_MAKER_URL`, `FLASHCARD_GENERATOR_URL`, `CONCEPT_EXPLAINER_URL` | `localhost:810x` services |
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `8000` |

use crate::dispatch::ToolEndpoints;
use llm::RemoteLlmConfig;
use std::time::Duration;
use tooling::config::{get_env_or, get_env_parse_or, ConfigBuilder};
use tooling::ToolingError;

/// Top-level configuration of the orchestrator server
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    pub model: RemoteLlmConfig,
    pub endpoints: ToolEndpoints,
    pub host: String,
    pub port: u16,
}

impl OrchestratorConfig {
    /// Budget for a single tool call
    pub fn tool_timeout(&self) -> Duration {
        self.model.timeout
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            model: RemoteLlmConfig::default(),
            endpoints: ToolEndpoints::builtin(),
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl ConfigBuilder for OrchestratorConfig {
    fn validate(&self) -> tooling::Result<()> {
        self.model.validate()?;
        if self.host.trim().is_empty() {
            return Err(ToolingError::InvalidConfig(
                "HOST must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    fn from_env(prefix: &str) -> tooling::Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            model: RemoteLlmConfig::from_env(prefix)?,
            endpoints: ToolEndpoints::from_env(prefix)?,
            host: get_env_or(&format!("{}HOST", prefix), defaults.host)?,
            port: get_env_parse_or(&format!("{}PORT", prefix), defaults.port)?,
        })
    }
}
