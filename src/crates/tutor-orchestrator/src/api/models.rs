//! Request and response bodies

use serde::{Deserialize, Serialize};

use crate::context::ChatMessage;
use crate::pipeline::OrchestrationResult;

/// Body of `POST /orchestrate/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrchestrateRequest {
    pub user_id: String,
    pub message: String,
    #[serde(default)]
    pub chat_history: Vec<ChatMessage>,
}

/// Successful `POST /orchestrate/` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrchestrateResponse {
    pub ok: bool,
    pub data: OrchestrationResult,
}

impl OrchestrateResponse {
    pub fn new(data: OrchestrationResult) -> Self {
        Self { ok: true, data }
    }
}

/// `GET /health` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl HealthResponse {
    pub fn new(status: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            version: version.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chat_history_is_optional() {
        let request: OrchestrateRequest =
            serde_json::from_value(json!({"user_id": "s1", "message": "hi"})).unwrap();
        assert!(request.chat_history.is_empty());
    }

    #[test]
    fn test_request_with_history() {
        let request: OrchestrateRequest = serde_json::from_value(json!({
            "user_id": "s1",
            "message": "and now?",
            "chat_history": [{"role": "user", "content": "explain limits"}]
        }))
        .unwrap();
        assert_eq!(
            request.chat_history,
            vec![ChatMessage::new("user", "explain limits")]
        );
    }
}
