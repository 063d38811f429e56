use super::{OrchestrationResult, Stage, ToolDecision};
use crate::context::{ChatMessage, UserContext};
use crate::dispatch::ToolDispatcher;
use crate::extract::extract_json;
use crate::inference::{DefaultingPolicy, ParameterInferencer};
use crate::prompt::PromptComposer;
use crate::schema::{missing_required, validate, SchemaRegistry, SchemaViolation, ToolSchema};
use crate::{OrchestratorError, Result};
use llm::ModelGateway;
use serde_json::{Map, Value};
use std::sync::Arc;
use tooling::error::inline_error_chain;
use tooling::logging::timed;
use tracing::{debug, info, warn};

/// A validated decision and the model text it came from
struct Routed {
    decision: ToolDecision,
    raw: String,
}

/// Runs one request through the pipeline
///
/// Holds only read-only collaborators, so one instance serves every request
/// concurrently.
pub struct Orchestrator {
    gateway: Arc<dyn ModelGateway>,
    registry: Arc<SchemaRegistry>,
    prompt: PromptComposer,
    inferencer: ParameterInferencer,
    dispatcher: ToolDispatcher,
}

impl Orchestrator {
    pub fn new(
        gateway: Arc<dyn ModelGateway>,
        registry: Arc<SchemaRegistry>,
        dispatcher: ToolDispatcher,
    ) -> Self {
        Self {
            gateway,
            prompt: PromptComposer::new(registry.clone()),
            registry,
            inferencer: ParameterInferencer::default(),
            dispatcher,
        }
    }

    /// Replace the defaulting policy used by inference and merge
    pub fn with_policy(mut self, policy: DefaultingPolicy) -> Self {
        self.inferencer = ParameterInferencer::new(policy);
        self
    }

    /// Run the full pipeline for one request
    pub async fn orchestrate(
        &self,
        message: &str,
        history: &[ChatMessage],
        context: &UserContext,
    ) -> Result<OrchestrationResult> {
        match self.run(message, history, context).await {
            Ok(result) => {
                enter(Stage::Done);
                info!(tool = %result.tool, "Orchestration complete");
                Ok(result)
            }
            Err(e) => {
                warn!(
                    state = %e.failure_state(),
                    "Orchestration failed: {}",
                    inline_error_chain(&e)
                );
                if let OrchestratorError::ModelUnavailable(cause) = &e {
                    if cause.is_auth_error() {
                        warn!("Model rejected the credentials; check GEMINI_API_KEY");
                    }
                }
                Err(e)
            }
        }
    }

    /// Ask the model for a decision and validate it, repairing once
    ///
    /// Stops before context is merged; nothing is dispatched.
    pub async fn decide(
        &self,
        message: &str,
        history: &[ChatMessage],
        context: &UserContext,
    ) -> Result<ToolDecision> {
        self.route(message, history, context)
            .await
            .map(|routed| routed.decision)
    }

    async fn run(
        &self,
        message: &str,
        history: &[ChatMessage],
        context: &UserContext,
    ) -> Result<OrchestrationResult> {
        let Routed { decision, raw } = self.route(message, history, context).await?;
        let schema = self.schema_for(&decision.tool)?;

        enter(Stage::MergeContext);
        let parameters = self.merge_context(&decision.tool, decision.parameters, history, context)?;

        enter(Stage::ValidateToolScoped);
        validate(&schema.scoped(&parameters), schema).map_err(|v| violation(v, &raw))?;

        enter(Stage::Dispatch);
        let payload = Value::Object(parameters.clone());
        let result = timed("dispatch", self.dispatcher.execute(&decision.tool, &payload)).await;

        Ok(OrchestrationResult {
            tool: decision.tool,
            parameters,
            result,
        })
    }

    async fn route(
        &self,
        message: &str,
        history: &[ChatMessage],
        context: &UserContext,
    ) -> Result<Routed> {
        enter(Stage::QueryModel);
        let prompt = self.prompt.compose(message, history, context)?;
        let raw = timed("query_model", self.gateway.ask(&prompt)).await?;

        enter(Stage::Extract);
        let object = extract_json(&raw)?;
        let decision = ToolDecision::from_object(object, &raw)?;
        let schema = self.schema_for(&decision.tool)?;

        enter(Stage::ValidateRaw);
        let parameters = match validate(&decision.parameters, schema) {
            Ok(()) => decision.parameters,
            Err(first) => {
                let missing = missing_required(&decision.parameters, schema);
                enter(Stage::InferIfMissing);
                debug!(tool = %decision.tool, ?missing, violation = %first, "Repairing parameters");

                let filled = self.inferencer.infer(
                    schema,
                    &missing,
                    message,
                    context,
                    &decision.parameters,
                );

                enter(Stage::ValidateInferred);
                validate(&filled, schema).map_err(|v| violation(v, &raw))?;
                filled
            }
        };

        Ok(Routed {
            decision: ToolDecision {
                tool: decision.tool,
                parameters,
            },
            raw,
        })
    }

    fn schema_for(&self, tool: &str) -> Result<&ToolSchema> {
        self.registry
            .get(tool)
            .ok_or_else(|| OrchestratorError::UnknownTool {
                tool: tool.to_string(),
                available: self.registry.tool_names().join(", "),
            })
    }

    /// Attach profile and history, then fill context-driven fields that are
    /// still absent
    pub fn merge_context(
        &self,
        tool: &str,
        parameters: Map<String, Value>,
        history: &[ChatMessage],
        context: &UserContext,
    ) -> Result<Map<String, Value>> {
        let mut merged = parameters;
        merged.insert("user_info".to_string(), context.to_value());
        merged.insert("chat_history".to_string(), serde_json::to_value(history)?);

        for (field, value) in self.inferencer.policy().context_defaults(tool, context) {
            merged.entry(field).or_insert(value);
        }
        Ok(merged)
    }
}

fn enter(stage: Stage) {
    debug!(stage = %stage, "Pipeline stage");
}

fn violation(violation: SchemaViolation, raw: &str) -> OrchestratorError {
    OrchestratorError::SchemaViolation {
        field: violation.field,
        reason: violation.reason,
        raw: raw.to_string(),
    }
}
