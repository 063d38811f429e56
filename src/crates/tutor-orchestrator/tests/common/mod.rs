//! Shared fixtures for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use llm::{LlmError, ModelGateway};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tutor_orchestrator::context::{MASTERY_LEVEL_SUMMARY, PREFERRED_TEACHING_STYLE};
use tutor_orchestrator::{
    Orchestrator, SchemaRegistry, ToolDispatcher, ToolEndpoints, UserContext,
};

/// Model stand-in that replays a fixed reply and records prompts
#[derive(Clone)]
pub struct MockModelGateway {
    reply: Option<String>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockModelGateway {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every call fails as if the retry budget ran out
    pub fn unavailable() -> Self {
        Self {
            reply: None,
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ModelGateway for MockModelGateway {
    async fn ask(&self, prompt: &str) -> llm::Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(LlmError::ModelUnavailable {
                attempts: 3,
                source: Box::new(LlmError::ProviderError {
                    status: 503,
                    body: "overloaded".to_string(),
                }),
            }),
        }
    }
}

pub fn learner(mastery: &str, style: &str) -> UserContext {
    UserContext::new()
        .with("user_id", "student123")
        .with(MASTERY_LEVEL_SUMMARY, mastery)
        .with(PREFERRED_TEACHING_STYLE, style)
}

pub fn orchestrator_with(
    gateway: &MockModelGateway,
    endpoints: ToolEndpoints,
    tool_timeout: Duration,
) -> Orchestrator {
    Orchestrator::new(
        Arc::new(gateway.clone()),
        Arc::new(SchemaRegistry::builtin()),
        ToolDispatcher::new(endpoints, tool_timeout).unwrap(),
    )
}

/// Orchestrator whose tools all fall back to mocks
pub fn offline_orchestrator(gateway: &MockModelGateway) -> Orchestrator {
    orchestrator_with(gateway, ToolEndpoints::new(), Duration::from_secs(1))
}
