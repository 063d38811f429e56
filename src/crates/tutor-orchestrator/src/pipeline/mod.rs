//! Request-scoped orchestration pipeline
//!
//! A request moves strictly forward through [`Stage`]s. Any stage may end
//! the request in one of the terminal failure states; dispatch itself never
//! fails because the dispatcher falls back to a mock.

mod orchestrator;

pub use orchestrator::Orchestrator;

use crate::{OrchestratorError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Pipeline states, in execution order, followed by terminal failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    QueryModel,
    Extract,
    ValidateRaw,
    InferIfMissing,
    ValidateInferred,
    MergeContext,
    ValidateToolScoped,
    Dispatch,
    Done,
    ModelFailed,
    NoJson,
    UnknownTool,
    ValidationFailed,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::QueryModel => "QUERY_MODEL",
            Stage::Extract => "EXTRACT",
            Stage::ValidateRaw => "VALIDATE_RAW",
            Stage::InferIfMissing => "INFER_IF_MISSING",
            Stage::ValidateInferred => "VALIDATE_INFERRED",
            Stage::MergeContext => "MERGE_CONTEXT",
            Stage::ValidateToolScoped => "VALIDATE_TOOL_SCOPED",
            Stage::Dispatch => "DISPATCH",
            Stage::Done => "DONE",
            Stage::ModelFailed => "MODEL_FAILED",
            Stage::NoJson => "NO_JSON",
            Stage::UnknownTool => "UNKNOWN_TOOL",
            Stage::ValidationFailed => "VALIDATION_FAILED",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The model's choice of tool and its proposed parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDecision {
    pub tool: String,
    pub parameters: Map<String, Value>,
}

impl ToolDecision {
    /// Read a decision out of an extracted object
    ///
    /// `raw` is the model output the object came from, kept for errors.
    pub fn from_object(mut object: Map<String, Value>, raw: &str) -> Result<Self> {
        let tool = match object.remove("tool") {
            Some(Value::String(tool)) => tool,
            Some(other) => {
                return Err(invalid_decision(
                    format!("'tool' must be a string, got {}", other),
                    raw,
                ))
            }
            None => return Err(invalid_decision("missing 'tool' key".to_string(), raw)),
        };

        let parameters = match object.remove("parameters") {
            Some(Value::Object(parameters)) => parameters,
            Some(other) => {
                return Err(invalid_decision(
                    format!("'parameters' must be an object, got {}", other),
                    raw,
                ))
            }
            None => {
                return Err(invalid_decision(
                    "missing 'parameters' key".to_string(),
                    raw,
                ))
            }
        };

        Ok(Self { tool, parameters })
    }
}

fn invalid_decision(reason: String, raw: &str) -> OrchestratorError {
    OrchestratorError::InvalidDecision {
        reason,
        raw: raw.to_string(),
    }
}

/// Outcome of a successful request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrchestrationResult {
    pub tool: String,
    /// Final parameters, including `user_info` and `chat_history`
    pub parameters: Map<String, Value>,
    /// Tool output, or its mock
    pub result: Value,
}
