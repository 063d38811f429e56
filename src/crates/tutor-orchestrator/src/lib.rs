//! Tool-routing middleware for an AI tutor
//!
//! A free-text request and a learner profile go in; the language model picks
//! one of a fixed set of tutoring tools and proposes parameters for it; the
//! parameters are extracted, validated, repaired from context when
//! incomplete, and finally sent to the tool service. An unreachable tool is
//! replaced by a deterministic mock so a request never fails at dispatch.
//!
//! # Pipeline
//!
//! ```text
//! QUERY_MODEL -> EXTRACT -> VALIDATE_RAW -> (INFER_IF_MISSING -> VALIDATE_INFERRED)
//!     -> MERGE_CONTEXT -> VALIDATE_TOOL_SCOPED -> DISPATCH -> DONE
//! ```
//!
//! # Modules
//!
//! - `schema` - Tool parameter schemas and the structural validator
//! - `extract` - First balanced JSON object in free text
//! - `inference` - Deterministic gap filling and the shared defaulting policy
//! - `dispatch` - Tool endpoint table, HTTP dispatch and mock fallback
//! - `pipeline` - The request-scoped state machine
//! - `api` - HTTP front door

pub mod api;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod extract;
pub mod inference;
pub mod pipeline;
pub mod prompt;
pub mod schema;

pub use config::OrchestratorConfig;
pub use context::{ChatMessage, StaticProfileProvider, UserContext, UserContextProvider};
pub use dispatch::{ToolDispatcher, ToolEndpoints};
pub use pipeline::{OrchestrationResult, Orchestrator, Stage, ToolDecision};
pub use schema::{SchemaRegistry, ToolSchema};

use llm::LlmError;
use thiserror::Error;

/// Errors that end an orchestration request
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// The model could not be reached within the retry budget
    #[error(transparent)]
    ModelUnavailable(#[from] LlmError),

    /// The model answered without any parseable JSON object
    #[error("No JSON object found in model output. Raw output: {raw}")]
    NoJsonFound { raw: String },

    /// The model chose a tool that is not registered
    #[error("Model suggested unknown tool '{tool}' (available: {available})")]
    UnknownTool { tool: String, available: String },

    /// The extracted object is not shaped like a tool decision
    #[error("Model decision is malformed: {reason}. Raw output: {raw}")]
    InvalidDecision { reason: String, raw: String },

    /// Parameters still violate the tool schema after repair
    #[error("Parameter '{field}' failed validation: {reason}. Raw output: {raw}")]
    SchemaViolation {
        field: String,
        reason: String,
        raw: String,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl OrchestratorError {
    /// Terminal pipeline state this error ends in
    pub fn failure_state(&self) -> Stage {
        match self {
            OrchestratorError::ModelUnavailable(_) | OrchestratorError::Serialization(_) => {
                Stage::ModelFailed
            }
            OrchestratorError::NoJsonFound { .. } => Stage::NoJson,
            OrchestratorError::UnknownTool { .. } => Stage::UnknownTool,
            OrchestratorError::InvalidDecision { .. }
            | OrchestratorError::SchemaViolation { .. } => Stage::ValidationFailed,
        }
    }
}

/// Result type for orchestrator operations
pub type Result<T> = std::result::Result<T, OrchestratorError>;

/// Get version information
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
