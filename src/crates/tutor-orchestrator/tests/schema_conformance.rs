//! Cross-check the built-in validator and inferencer against a full JSON
//! Schema implementation, using each tool's rendered schema

use jsonschema::JSONSchema;
use serde_json::{json, Map, Value};
use tutor_orchestrator::context::{MASTERY_LEVEL_SUMMARY, PREFERRED_TEACHING_STYLE};
use tutor_orchestrator::inference::ParameterInferencer;
use tutor_orchestrator::schema::{missing_required, validate};
use tutor_orchestrator::{SchemaRegistry, ToolSchema, UserContext};

fn compiled(schema: &ToolSchema) -> JSONSchema {
    JSONSchema::compile(&schema.to_json_schema()).expect("rendered schema compiles")
}

fn object(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

const MESSAGES: &[&str] = &[
    "I need practice problems on derivatives",
    "Can you explain photosynthesis?",
    "what are prime numbers",
    "tell me about the French revolution",
    "I'm struggling with fractions!",
    "need help with essay structure",
    "history",
    "I have a big exam next week and I do not know where to start",
    "",
];

#[test]
fn test_inferred_parameters_satisfy_json_schema() {
    let registry = SchemaRegistry::builtin();
    let inferencer = ParameterInferencer::default();

    for schema in registry.iter() {
        let reference = compiled(schema);
        for message in MESSAGES {
            for level in [1, 3, 4, 6, 7, 10] {
                for style in ["visual", "auditory", ""] {
                    let context = UserContext::new()
                        .with(MASTERY_LEVEL_SUMMARY, format!("Level {}", level))
                        .with(PREFERRED_TEACHING_STYLE, style);
                    let params = Map::new();
                    let missing = missing_required(&params, schema);

                    let filled = inferencer.infer(schema, &missing, message, &context, &params);
                    let instance = Value::Object(filled.clone());

                    assert!(
                        reference.is_valid(&instance),
                        "{} / {:?} / level {} / {:?}: {}",
                        schema.name(),
                        message,
                        level,
                        style,
                        instance
                    );
                    assert_eq!(validate(&filled, schema), Ok(()));
                }
            }
        }
    }
}

#[test]
fn test_validator_agrees_with_json_schema() {
    let registry = SchemaRegistry::builtin();
    let cases = [
        (
            "flashcard_generator",
            json!({"topic": "t", "count": 5, "difficulty": "easy", "subject": "s"}),
        ),
        (
            "flashcard_generator",
            json!({"topic": "t", "count": 0, "difficulty": "easy", "subject": "s"}),
        ),
        (
            "flashcard_generator",
            json!({"topic": "t", "count": 21, "difficulty": "easy", "subject": "s"}),
        ),
        (
            "flashcard_generator",
            json!({"topic": "t", "count": "5", "difficulty": "easy", "subject": "s"}),
        ),
        (
            "flashcard_generator",
            json!({"topic": "t", "count": 5, "difficulty": "extreme", "subject": "s"}),
        ),
        ("flashcard_generator", json!({"topic": "t", "count": 5})),
        (
            "note_maker",
            json!({"topic": "t", "subject": "s", "note_taking_style": "narrative", "extra": 1}),
        ),
        (
            "note_maker",
            json!({"topic": null, "subject": "s", "note_taking_style": "narrative"}),
        ),
        (
            "note_maker",
            json!({"topic": "t", "subject": "s", "note_taking_style": "outline", "include_examples": "yes"}),
        ),
        (
            "concept_explainer",
            json!({"concept_to_explain": "c", "current_topic": "t", "desired_depth": "comprehensive"}),
        ),
        (
            "concept_explainer",
            json!({"concept_to_explain": "c", "current_topic": 7, "desired_depth": "basic"}),
        ),
    ];

    for (tool, instance) in cases {
        let schema = registry.get(tool).unwrap();
        let expected = compiled(schema).is_valid(&instance);
        let actual = validate(&object(instance.clone()), schema).is_ok();
        assert_eq!(actual, expected, "{}: {}", tool, instance);
    }
}
