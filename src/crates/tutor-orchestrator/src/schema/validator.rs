//! Structural validation of tool parameters
//!
//! Checks, in order:
//! - Every required field is present
//! - Every declared field that is present has the declared type
//! - Integers are within range and enum values are listed
//!
//! Fields the schema does not declare are ignored.

use super::{FieldType, ToolSchema};
use serde_json::{Map, Value};
use std::fmt;

/// First schema rule a parameter mapping breaks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    pub field: String,
    pub reason: String,
}

impl SchemaViolation {
    fn new(field: &str, reason: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}': {}", self.field, self.reason)
    }
}

impl std::error::Error for SchemaViolation {}

/// Validate `instance` against `schema`
pub fn validate(instance: &Map<String, Value>, schema: &ToolSchema) -> Result<(), SchemaViolation> {
    for field in schema.required_fields() {
        if !instance.contains_key(*field) {
            return Err(SchemaViolation::new(field, "required field is missing"));
        }
    }

    for (field, field_type) in schema.properties() {
        if let Some(value) = instance.get(field) {
            check_value(value, field_type).map_err(|reason| SchemaViolation::new(field, reason))?;
        }
    }

    Ok(())
}

/// Required fields that are absent or `null`, in declaration order
pub fn missing_required(instance: &Map<String, Value>, schema: &ToolSchema) -> Vec<&'static str> {
    schema
        .required_fields()
        .iter()
        .copied()
        .filter(|field| instance.get(*field).map_or(true, Value::is_null))
        .collect()
}

fn check_value(value: &Value, field_type: FieldType) -> Result<(), String> {
    match field_type {
        FieldType::String => value
            .as_str()
            .map(|_| ())
            .ok_or_else(|| type_mismatch(field_type, value)),
        FieldType::Boolean => value
            .as_bool()
            .map(|_| ())
            .ok_or_else(|| type_mismatch(field_type, value)),
        FieldType::Integer { min, max } => {
            let number = integer_value(value).ok_or_else(|| type_mismatch(field_type, value))?;
            if number < min || number > max {
                return Err(format!(
                    "expected integer between {} and {}, got {}",
                    min, max, value
                ));
            }
            Ok(())
        }
        FieldType::Enum(allowed) => {
            let text = value
                .as_str()
                .ok_or_else(|| type_mismatch(field_type, value))?;
            if !allowed.contains(&text) {
                return Err(format!(
                    "expected one of [{}], got {}",
                    allowed.join(", "),
                    value
                ));
            }
            Ok(())
        }
    }
}

/// JSON integers, and floats with no fractional part
fn integer_value(value: &Value) -> Option<i64> {
    if let Some(number) = value.as_i64() {
        return Some(number);
    }
    match value.as_f64() {
        Some(number) if number.is_finite() && number.fract() == 0.0 => Some(number as i64),
        _ => None,
    }
}

fn type_mismatch(expected: FieldType, value: &Value) -> String {
    format!("expected {}, got {}", expected.type_name(), value_type(value))
}

fn value_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
