//! Deterministic parameter inference
//!
//! Fills required fields the model left out, using the user's message and
//! profile. Never calls the model and never changes the chosen tool.

pub mod policy;
mod topic;

pub use policy::{DefaultingPolicy, MasteryTier, DEFAULT_COUNT, DEFAULT_MASTERY_LEVEL};
pub use topic::topic_candidates;

use crate::context::UserContext;
use crate::schema::{FieldType, ToolSchema};
use policy::DEFAULT_SUBJECT;
use serde_json::{json, Map, Value};
use tracing::debug;

/// Fills gaps in a tool decision's parameters
#[derive(Debug, Clone, Copy, Default)]
pub struct ParameterInferencer {
    policy: DefaultingPolicy,
}

impl ParameterInferencer {
    pub fn new(policy: DefaultingPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &DefaultingPolicy {
        &self.policy
    }

    /// Fill `missing` fields of `params`, then replace leftover nulls
    ///
    /// Fields are visited in the schema's declaration order, so a field may
    /// depend on one filled earlier (`current_topic` reuses
    /// `concept_to_explain`).
    pub fn infer(
        &self,
        schema: &ToolSchema,
        missing: &[&str],
        message: &str,
        context: &UserContext,
        params: &Map<String, Value>,
    ) -> Map<String, Value> {
        let mut filled = params.clone();
        let candidates = topic_candidates(message);
        let primary = candidates.first().map(String::as_str);

        for (field, _) in schema.properties() {
            if !missing.contains(&field) {
                continue;
            }
            if let Some(value) = self.value_for(field, primary, message, context, &filled) {
                debug!(tool = schema.name(), field, value = %value, "Inferred parameter");
                filled.insert(field.to_string(), value);
            }
        }

        self.replace_nulls(schema, message, &mut filled);
        filled
    }

    fn value_for(
        &self,
        field: &str,
        primary: Option<&str>,
        message: &str,
        context: &UserContext,
        filled: &Map<String, Value>,
    ) -> Option<Value> {
        let value = match field {
            "topic" | "concept_to_explain" => json!(primary.unwrap_or(message)),
            "subject" => json!(primary.unwrap_or(DEFAULT_SUBJECT)),
            "current_topic" => match filled.get("concept_to_explain") {
                Some(concept) if !concept.is_null() => concept.clone(),
                _ => json!(primary.unwrap_or(message)),
            },
            "count" => json!(self.policy.default_count),
            "difficulty" => json!(self.policy.difficulty_for(context)),
            "desired_depth" => json!(self.policy.depth_for(context)),
            "note_taking_style" => json!(self.policy.note_style_for(context)),
            "include_examples" => json!(self.policy.include_examples()),
            "include_analogies" => json!(self.policy.analogies_for(context)),
            _ => return None,
        };
        Some(value)
    }

    /// Safety pass over declared fields that are still `null`
    fn replace_nulls(&self, schema: &ToolSchema, message: &str, filled: &mut Map<String, Value>) {
        for (field, field_type) in schema.properties() {
            let Some(slot) = filled.get_mut(field) else {
                continue;
            };
            if !slot.is_null() {
                continue;
            }
            let fallback = match field_type {
                FieldType::String => json!(message),
                FieldType::Boolean => json!(true),
                FieldType::Integer { min, max } => json!(1_i64.max(min).min(max)),
                FieldType::Enum(values) => match values.first() {
                    Some(first) => json!(first),
                    None => continue,
                },
            };
            debug!(tool = schema.name(), field, "Replaced null parameter");
            *slot = fallback;
        }
    }
}
