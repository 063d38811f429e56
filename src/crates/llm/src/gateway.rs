//! The prompt-in, text-out seam between the orchestrator and a model.

use crate::error::Result;
use async_trait::async_trait;

/// A language model that answers a single-turn prompt with free text.
///
/// Implementations own their transport concerns (timeouts, retries). A
/// returned error means the model could not be reached at all; the caller
/// treats it as fatal for the request.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Send one prompt and return the model's raw text answer.
    async fn ask(&self, prompt: &str) -> Result<String>;
}
