//! End-to-end tests of the orchestration pipeline
//!
//! The model is scripted; tool services are either wiremock servers or
//! absent, in which case the dispatcher's mock answers.

mod common;

use common::{learner, offline_orchestrator, orchestrator_with, MockModelGateway};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tutor_orchestrator::{ChatMessage, OrchestratorError, Stage, ToolEndpoints};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DERIVATIVES_MESSAGE: &str = "I need practice problems on derivatives";
const DERIVATIVES_DECISION: &str =
    r#"{"tool":"flashcard_generator","parameters":{"topic":"derivatives"}}"#;

#[tokio::test]
async fn test_practice_request_reaches_flashcard_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/flashcards"))
        .and(body_partial_json(json!({
            "topic": "derivatives",
            "count": 5,
            "difficulty": "medium",
            "subject": "derivatives",
            "user_info": {"user_id": "student123"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "topic": "derivatives",
            "flashcards": [{"question": "d/dx x^2?", "answer": "2x"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = MockModelGateway::replying(format!(
        "Sure, here is the routing decision:\n{}\nGood luck!",
        DERIVATIVES_DECISION
    ));
    let endpoints = ToolEndpoints::new()
        .with_endpoint("flashcard_generator", format!("{}/flashcards", server.uri()));
    let orchestrator = orchestrator_with(&gateway, endpoints, Duration::from_secs(2));

    let history = vec![ChatMessage::new("user", "hello"), ChatMessage::new("assistant", "hi!")];
    let result = orchestrator
        .orchestrate(
            DERIVATIVES_MESSAGE,
            &history,
            &learner("Level 4: Building foundational knowledge", "visual"),
        )
        .await
        .unwrap();

    assert_eq!(result.tool, "flashcard_generator");
    assert_eq!(result.parameters["count"], 5);
    assert_eq!(result.parameters["difficulty"], "medium");
    assert_eq!(result.parameters["subject"], "derivatives");
    assert_eq!(
        result.parameters["chat_history"],
        json!([
            {"role": "user", "content": "hello"},
            {"role": "assistant", "content": "hi!"}
        ])
    );
    assert_eq!(result.result["flashcards"][0]["answer"], "2x");
    assert_eq!(gateway.call_count(), 1);
}

#[tokio::test]
async fn test_practice_request_with_tool_down_uses_mock() {
    let gateway = MockModelGateway::replying(DERIVATIVES_DECISION);
    let endpoints =
        ToolEndpoints::new().with_endpoint("flashcard_generator", "http://127.0.0.1:1/flashcards");
    let orchestrator = orchestrator_with(&gateway, endpoints, Duration::from_secs(2));

    let result = orchestrator
        .orchestrate(DERIVATIVES_MESSAGE, &[], &learner("Level 4", "visual"))
        .await
        .unwrap();

    assert_eq!(result.result["adaptation_details"], "mocked");
    assert_eq!(result.result["difficulty"], "medium");
    let cards = result.result["flashcards"].as_array().unwrap();
    assert_eq!(cards.len(), 5);
    assert_eq!(cards[0]["title"], "derivatives #1");
}

#[tokio::test]
async fn test_model_without_json_is_not_dispatched() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let gateway = MockModelGateway::replying("You should make some flashcards about derivatives.");
    let endpoints = ToolEndpoints::new()
        .with_endpoint("flashcard_generator", format!("{}/flashcards", server.uri()));
    let orchestrator = orchestrator_with(&gateway, endpoints, Duration::from_secs(2));

    let err = orchestrator
        .orchestrate(DERIVATIVES_MESSAGE, &[], &learner("Level 4", ""))
        .await
        .unwrap_err();

    assert_eq!(err.failure_state(), Stage::NoJson);
    match err {
        OrchestratorError::NoJsonFound { raw } => {
            assert_eq!(raw, "You should make some flashcards about derivatives.")
        }
        other => panic!("expected NoJsonFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unknown_tool_is_rejected_without_inference() {
    let gateway =
        MockModelGateway::replying(r#"{"tool": "quiz_maker", "parameters": {"topic": "x"}}"#);
    let orchestrator = offline_orchestrator(&gateway);

    let err = orchestrator
        .orchestrate("quiz me", &[], &learner("Level 4", ""))
        .await
        .unwrap_err();

    assert_eq!(err.failure_state(), Stage::UnknownTool);
    assert_eq!(
        err.to_string(),
        "Model suggested unknown tool 'quiz_maker' (available: note_maker, flashcard_generator, concept_explainer)"
    );
}

#[tokio::test]
async fn test_model_unavailable_is_fatal() {
    let gateway = MockModelGateway::unavailable();
    let orchestrator = offline_orchestrator(&gateway);

    let err = orchestrator
        .orchestrate("explain gravity", &[], &learner("Level 4", ""))
        .await
        .unwrap_err();

    assert_eq!(err.failure_state(), Stage::ModelFailed);
    assert!(matches!(err, OrchestratorError::ModelUnavailable(_)));
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_decision_without_parameters_fails_validation() {
    let gateway = MockModelGateway::replying(r#"{"tool": "note_maker"}"#);
    let orchestrator = offline_orchestrator(&gateway);

    let err = orchestrator
        .orchestrate("notes on cells", &[], &learner("Level 4", ""))
        .await
        .unwrap_err();

    assert_eq!(err.failure_state(), Stage::ValidationFailed);
}

#[tokio::test]
async fn test_out_of_range_count_is_fatal_with_raw_output() {
    let reply = r#"{"tool": "flashcard_generator", "parameters": {"topic": "t", "count": 50, "difficulty": "easy", "subject": "s"}}"#;
    let gateway = MockModelGateway::replying(reply);
    let orchestrator = offline_orchestrator(&gateway);

    let err = orchestrator
        .orchestrate("lots of flashcards", &[], &learner("Level 4", ""))
        .await
        .unwrap_err();

    match err {
        OrchestratorError::SchemaViolation { field, raw, .. } => {
            assert_eq!(field, "count");
            assert_eq!(raw, reply);
        }
        other => panic!("expected SchemaViolation, got {:?}", other),
    }
}

#[tokio::test]
async fn test_explainer_depth_follows_mastery() {
    let reply = r#"{"tool": "concept_explainer", "parameters": {}}"#;

    for (mastery, depth) in [
        ("Level 2: Beginner", "basic"),
        ("Level 5", "intermediate"),
        ("Level 8: Expert", "advanced"),
    ] {
        let gateway = MockModelGateway::replying(reply);
        let result = offline_orchestrator(&gateway)
            .orchestrate("Can you explain Newton's laws?", &[], &learner(mastery, ""))
            .await
            .unwrap();

        assert_eq!(result.parameters["desired_depth"], depth, "{}", mastery);
        assert_eq!(result.parameters["concept_to_explain"], "newton");
        assert_eq!(result.parameters["include_examples"], true);
    }
}

#[tokio::test]
async fn test_note_maker_style_follows_teaching_style() {
    let reply = r#"{"tool": "note_maker", "parameters": {"topic": "mitosis", "subject": "biology"}}"#;

    let gateway = MockModelGateway::replying(reply);
    let visual = offline_orchestrator(&gateway)
        .orchestrate("notes on mitosis", &[], &learner("Level 4", "VISUAL"))
        .await
        .unwrap();
    assert_eq!(visual.parameters["note_taking_style"], "structured");
    assert_eq!(visual.parameters["include_analogies"], true);
    assert_eq!(visual.result["note_taking_style"], "structured");

    let gateway = MockModelGateway::replying(reply);
    let verbal = offline_orchestrator(&gateway)
        .orchestrate("notes on mitosis", &[], &learner("Level 4", "verbal"))
        .await
        .unwrap();
    assert_eq!(verbal.parameters["note_taking_style"], "outline");
    assert_eq!(verbal.parameters["include_analogies"], false);
}

#[tokio::test]
async fn test_prompt_carries_request_context() {
    let gateway = MockModelGateway::replying(DERIVATIVES_DECISION);
    offline_orchestrator(&gateway)
        .orchestrate(
            DERIVATIVES_MESSAGE,
            &[ChatMessage::new("user", "earlier question")],
            &learner("Level 4", "visual"),
        )
        .await
        .unwrap();

    let prompt = gateway.last_prompt().unwrap();
    assert!(prompt.contains(&format!("Conversation message: {}", DERIVATIVES_MESSAGE)));
    assert!(prompt.contains("earlier question"));
    assert!(prompt.contains(r#""preferred_teaching_style":"visual""#));
    assert!(prompt.ends_with("RETURN VALID JSON ONLY."));
}

#[tokio::test]
async fn test_concurrent_requests_are_independent() {
    let gateway = MockModelGateway::replying(DERIVATIVES_DECISION);
    let orchestrator = Arc::new(offline_orchestrator(&gateway));

    let handles: Vec<_> = (1..=8u32)
        .map(|level| {
            let orchestrator = orchestrator.clone();
            tokio::spawn(async move {
                let context = learner(&format!("Level {}", level), "");
                orchestrator
                    .orchestrate(DERIVATIVES_MESSAGE, &[], &context)
                    .await
                    .map(|result| (level, result.parameters["difficulty"].clone()))
            })
        })
        .collect();

    for handle in handles {
        let (level, difficulty) = handle.await.unwrap().unwrap();
        let expected = match level {
            0..=3 => "easy",
            4..=6 => "medium",
            _ => "hard",
        };
        assert_eq!(difficulty, Value::from(expected), "level {}", level);
    }
    assert_eq!(gateway.call_count(), 8);
}
