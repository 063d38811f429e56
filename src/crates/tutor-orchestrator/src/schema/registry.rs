//! Built-in tutoring tools

use super::{FieldType, ToolSchema};

pub const NOTE_MAKER: &str = "note_maker";
pub const FLASHCARD_GENERATOR: &str = "flashcard_generator";
pub const CONCEPT_EXPLAINER: &str = "concept_explainer";

/// `note_taking_style` values
pub const NOTE_STYLES: &[&str] = &["outline", "bullet_points", "narrative", "structured"];

/// `difficulty` values, easiest first
pub const DIFFICULTIES: &[&str] = &["easy", "medium", "hard"];

/// `desired_depth` values, shallowest first
pub const DEPTHS: &[&str] = &["basic", "intermediate", "advanced", "comprehensive"];

/// Read-only lookup from tool name to parameter schema
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    tools: Vec<ToolSchema>,
}

impl SchemaRegistry {
    pub fn new(tools: Vec<ToolSchema>) -> Self {
        Self { tools }
    }

    /// The three tutoring tools
    pub fn builtin() -> Self {
        Self::new(vec![
            ToolSchema::new(NOTE_MAKER)
                .required("topic", FieldType::String)
                .required("subject", FieldType::String)
                .required("note_taking_style", FieldType::Enum(NOTE_STYLES))
                .optional("include_examples", FieldType::Boolean)
                .optional("include_analogies", FieldType::Boolean),
            ToolSchema::new(FLASHCARD_GENERATOR)
                .required("topic", FieldType::String)
                .required("count", FieldType::Integer { min: 1, max: 20 })
                .required("difficulty", FieldType::Enum(DIFFICULTIES))
                .optional("include_examples", FieldType::Boolean)
                .required("subject", FieldType::String),
            ToolSchema::new(CONCEPT_EXPLAINER)
                .required("concept_to_explain", FieldType::String)
                .required("current_topic", FieldType::String)
                .required("desired_depth", FieldType::Enum(DEPTHS))
                .optional("include_examples", FieldType::Boolean),
        ])
    }

    pub fn get(&self, tool: &str) -> Option<&ToolSchema> {
        self.tools.iter().find(|schema| schema.name() == tool)
    }

    /// Tool names in registration order
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.tools.iter().map(ToolSchema::name).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToolSchema> {
        self.tools.iter()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
