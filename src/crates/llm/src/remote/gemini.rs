//! Google Gemini client implementation.
//!
//! Sends a single-turn prompt to a `generateContent` endpoint and returns
//! the first candidate's first text part.
//!
//! # Example
//!
//! ```rust,ignore
//! use llm::remote::GeminiClient;
//! use llm::{ModelGateway, RemoteLlmConfig};
//!
//! let config = RemoteLlmConfig::new(api_key, llm::config::DEFAULT_GEMINI_API_URL);
//! let client = GeminiClient::new(config)?;
//! let text = client.ask("Hello!").await?;
//! ```

use crate::config::RemoteLlmConfig;
use crate::error::{LlmError, Result};
use crate::gateway::ModelGateway;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Serialize;
use serde_json::Value;
use tooling::async_utils::retry::{with_retry, RetryPolicy};
use tooling::async_utils::timeout::{with_timeout, TimeoutError};
use tooling::logging::sanitize_for_logging;

/// Google Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    config: RemoteLlmConfig,
    endpoint: Url,
    client: Client,
    retry: RetryPolicy,
}

impl GeminiClient {
    /// Create a new Gemini client with the given configuration.
    ///
    /// The key is appended as a `key` query parameter unless the configured
    /// URL already has one.
    pub fn new(config: RemoteLlmConfig) -> Result<Self> {
        let mut endpoint = Url::parse(&config.api_url).map_err(|e| {
            LlmError::ConfigError(format!(
                "invalid model API URL {}: {}",
                sanitize_for_logging(&config.api_url),
                e
            ))
        })?;

        let has_key = endpoint.query_pairs().any(|(name, _)| name == "key");
        if !has_key && !config.api_key.is_empty() {
            endpoint.query_pairs_mut().append_pair("key", &config.api_key);
        }

        let client = Client::builder().build()?;
        let retry = RetryPolicy::new(config.max_retries);

        Ok(Self {
            config,
            endpoint,
            client,
            retry,
        })
    }

    /// One request/response round trip, bounded by the configured timeout.
    async fn generate_once(&self, body: &GeminiRequest<'_>) -> Result<String> {
        let request = self.client.post(self.endpoint.clone()).json(body);

        let envelope = with_timeout(self.config.timeout, async move {
            let response = request.send().await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(LlmError::ProviderError {
                    status: status.as_u16(),
                    body,
                });
            }

            let envelope: Value = response
                .json()
                .await
                .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;
            Ok(envelope)
        })
        .await
        .map_err(|e| match e {
            TimeoutError::Timeout(d) => LlmError::Timeout(d),
            TimeoutError::OperationFailed(e) => e,
        })?;

        if !envelope.is_object() {
            return Err(LlmError::InvalidResponse(format!(
                "expected a JSON object envelope, got: {}",
                envelope
            )));
        }

        Ok(candidate_text(&envelope))
    }
}

/// Extract `candidates[0].content.parts[0].text`, or the whole envelope
/// serialized as JSON when that path is absent.
pub fn candidate_text(envelope: &Value) -> String {
    envelope
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| envelope.to_string())
}

#[async_trait]
impl ModelGateway for GeminiClient {
    async fn ask(&self, prompt: &str) -> Result<String> {
        let body = GeminiRequest::single_turn(prompt);

        with_retry(&self.retry, "gemini_generate_content", || {
            self.generate_once(&body)
        })
        .await
        .map_err(|exhausted| {
            tracing::warn!(
                attempts = exhausted.attempts,
                endpoint = %sanitize_for_logging(self.endpoint.as_str()),
                "Model request failed: {}",
                exhausted.last_error
            );
            LlmError::ModelUnavailable {
                attempts: exhausted.attempts,
                source: Box::new(exhausted.last_error),
            }
        })
    }
}

// Gemini API types
#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiMessage<'a>>,
}

impl<'a> GeminiRequest<'a> {
    fn single_turn(prompt: &'a str) -> Self {
        Self {
            contents: vec![GeminiMessage {
                parts: vec![GeminiPart { text: prompt }],
            }],
        }
    }
}

#[derive(Debug, Serialize)]
struct GeminiMessage<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}
