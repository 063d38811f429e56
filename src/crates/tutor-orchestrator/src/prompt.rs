//! Routing prompt composition

use crate::context::{ChatMessage, UserContext};
use crate::schema::SchemaRegistry;
use std::fmt::Write;
use std::sync::Arc;

const INSTRUCTIONS: &str = "\
You are the routing component of an AI tutoring service.
Choose exactly one tool for the student's request and fill in its parameters.
Reply with a single JSON object and nothing else: no explanation, no commentary.
The object must have two top-level keys:
- tool: the name of one of the tools listed below
- parameters: an object matching that tool's parameter schema";

const EXAMPLE: &str = r#"{"tool": "note_maker", "parameters": {"topic": "derivatives", "subject": "calculus", "note_taking_style": "outline", "include_examples": true, "include_analogies": false}}"#;

/// Builds the single-turn prompt sent to the model
#[derive(Debug, Clone)]
pub struct PromptComposer {
    registry: Arc<SchemaRegistry>,
}

impl PromptComposer {
    pub fn new(registry: Arc<SchemaRegistry>) -> Self {
        Self { registry }
    }

    /// Prompt for one request; the last line is always `RETURN VALID JSON ONLY.`
    pub fn compose(
        &self,
        message: &str,
        history: &[ChatMessage],
        context: &UserContext,
    ) -> serde_json::Result<String> {
        let mut prompt = String::from(INSTRUCTIONS);

        prompt.push_str("\n\nTools and their parameter schemas:\n");
        for schema in self.registry.iter() {
            let rendered = serde_json::to_string(&schema.to_json_schema())?;
            // writing to a String cannot fail
            let _ = writeln!(prompt, "- {}: {}", schema.name(), rendered);
        }

        let _ = write!(
            prompt,
            "\nExample reply:\n{}\n\n\
             Conversation message: {}\n\
             Chat history: {}\n\
             User profile: {}\n\n\
             RETURN VALID JSON ONLY.",
            EXAMPLE,
            message,
            serde_json::to_string(history)?,
            serde_json::to_string(context)?,
        );

        Ok(prompt)
    }
}
