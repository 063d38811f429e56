//! Tool parameter schemas
//!
//! Each tool declares its parameters once, in order, with a small set of
//! primitive types. The same declaration drives validation, inference order
//! and the JSON Schema shown to the model.

mod registry;
pub mod validator;

pub use registry::{
    SchemaRegistry, CONCEPT_EXPLAINER, DEPTHS, DIFFICULTIES, FLASHCARD_GENERATOR, NOTE_MAKER,
    NOTE_STYLES,
};
pub use validator::{missing_required, validate, SchemaViolation};

use serde_json::{json, Map, Value};

/// Type of a single declared parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Boolean,
    /// Integer within an inclusive range
    Integer { min: i64, max: i64 },
    /// String restricted to the listed values
    Enum(&'static [&'static str]),
}

impl FieldType {
    /// JSON type name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String | FieldType::Enum(_) => "string",
            FieldType::Boolean => "boolean",
            FieldType::Integer { .. } => "integer",
        }
    }

    /// Render as a JSON Schema property
    pub fn to_json_schema(&self) -> Value {
        match self {
            FieldType::String => json!({"type": "string"}),
            FieldType::Boolean => json!({"type": "boolean"}),
            FieldType::Integer { min, max } => {
                json!({"type": "integer", "minimum": min, "maximum": max})
            }
            FieldType::Enum(values) => json!({"type": "string", "enum": values}),
        }
    }
}

/// Parameter schema of one tool
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSchema {
    name: &'static str,
    required: Vec<&'static str>,
    properties: Vec<(&'static str, FieldType)>,
}

impl ToolSchema {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            required: Vec::new(),
            properties: Vec::new(),
        }
    }

    /// Declare a required parameter
    pub fn required(mut self, field: &'static str, field_type: FieldType) -> Self {
        self.required.push(field);
        self.properties.push((field, field_type));
        self
    }

    /// Declare an optional parameter
    pub fn optional(mut self, field: &'static str, field_type: FieldType) -> Self {
        self.properties.push((field, field_type));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Required fields in declaration order
    pub fn required_fields(&self) -> &[&'static str] {
        &self.required
    }

    /// All declared fields with their types, in declaration order
    pub fn properties(&self) -> impl Iterator<Item = (&'static str, FieldType)> + '_ {
        self.properties.iter().copied()
    }

    pub fn field_type(&self, field: &str) -> Option<FieldType> {
        self.properties
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, field_type)| *field_type)
    }

    pub fn declares(&self, field: &str) -> bool {
        self.field_type(field).is_some()
    }

    /// Keep only the entries this schema declares
    pub fn scoped(&self, params: &Map<String, Value>) -> Map<String, Value> {
        params
            .iter()
            .filter(|(key, _)| self.declares(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Render as a JSON Schema object document
    pub fn to_json_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .properties
            .iter()
            .map(|(name, field_type)| (name.to_string(), field_type.to_json_schema()))
            .collect();

        json!({
            "type": "object",
            "required": self.required,
            "properties": properties,
        })
    }
}
