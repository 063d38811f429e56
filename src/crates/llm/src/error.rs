//! Error types for the model gateway.

use std::time::Duration;
use thiserror::Error;

/// Result type for LLM operations.
pub type Result<T> = std::result::Result<T, LlmError>;

/// Errors that can occur when talking to a model.
#[derive(Debug, Error)]
pub enum LlmError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Failed to serialize/deserialize data.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The provider answered with a non-success status.
    #[error("Provider returned {status}: {body}")]
    ProviderError {
        /// HTTP status code
        status: u16,
        /// Response body, as text
        body: String,
    },

    /// The response body was not a usable envelope.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// A single attempt exceeded its time budget.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Every attempt allowed by the retry budget failed.
    #[error("Model unavailable after {attempts} attempt(s): {source}")]
    ModelUnavailable {
        /// Number of attempts made
        attempts: u32,
        /// Failure of the last attempt
        #[source]
        source: Box<LlmError>,
    },
}

impl LlmError {
    /// Check if this error is due to authentication.
    pub fn is_auth_error(&self) -> bool {
        match self {
            LlmError::ProviderError { status, .. } => *status == 401 || *status == 403,
            LlmError::ModelUnavailable { source, .. } => source.is_auth_error(),
            _ => false,
        }
    }
}

impl From<serde_json::Error> for LlmError {
    fn from(err: serde_json::Error) -> Self {
        LlmError::SerializationError(err.to_string())
    }
}
