//! HTTP integration tests for the session API.
//!
//! Builds the full router with the in-memory store and a scripted generator
//! and verifies:
//! - Session creation returns 201 with an id and invite code
//! - Joining by invite code activates the session
//! - Turn violations map to 403 and unknown sessions to 404
//! - A completed round includes the mediator reply
//! - Root and database health endpoints respond

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use duke::adapters::ai::MockTextGenerator;
use duke::adapters::storage::InMemoryDocumentStore;
use duke::app::{build_router, build_session_state};
use duke::config::{ConversationConfig, ServerConfig};
use duke::ports::DocumentStore;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn test_app(generator: MockTextGenerator) -> Router {
    let store: Arc<dyn DocumentStore> = Arc::new(InMemoryDocumentStore::new());
    let state = build_session_state(
        Arc::clone(&store),
        Arc::new(generator),
        &ConversationConfig::default(),
    );
    build_router(state, store, &ServerConfig::default())
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Creates a session for Alice and Bob, returning (session_id, invite_code).
async fn create(app: &Router) -> (String, String) {
    let (status, body) = send(
        app,
        "POST",
        "/api/sessions",
        Some(json!({ "creator_name": "Alice", "partner_name": "Bob" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    (
        body["session_id"].as_str().unwrap().to_string(),
        body["invite_code"].as_str().unwrap().to_string(),
    )
}

async fn join(app: &Router, code: &str, name: &str) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        "/api/sessions/join",
        Some(json!({ "invite_code": code, "participant_name": name })),
    )
    .await
}

async fn post(app: &Router, session_id: &str, sender: &str, content: &str) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        &format!("/api/sessions/{}/messages", session_id),
        Some(json!({ "sender_name": sender, "content": content })),
    )
    .await
}

// =============================================================================
// Session Lifecycle
// =============================================================================

#[tokio::test]
async fn create_returns_id_and_invite_code() {
    let app = test_app(MockTextGenerator::new());
    let (session_id, code) = create(&app).await;

    assert!(!session_id.is_empty());
    assert_eq!(code.len(), 6);

    let (status, body) = send(&app, "GET", &format!("/api/sessions/{}", session_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "waiting");
    assert_eq!(body["current_turn"], "Alice");
    assert_eq!(body["recent_messages"], json!([]));
}

#[tokio::test]
async fn create_rejects_blank_names() {
    let app = test_app(MockTextGenerator::new());
    let (status, body) = send(
        &app,
        "POST",
        "/api/sessions",
        Some(json!({ "creator_name": "", "partner_name": "Bob" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn join_activates_session() {
    let app = test_app(MockTextGenerator::new());
    let (session_id, code) = create(&app).await;

    let (status, body) = join(&app, &code, "Bob").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session_id"], session_id.as_str());
    assert_eq!(body["status"], "active");
}

#[tokio::test]
async fn join_errors_map_to_status_codes() {
    let app = test_app(MockTextGenerator::new());
    let (_, code) = create(&app).await;

    let (status, body) = join(&app, "ZZZZZZ", "Bob").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_code"], "SESSION_NOT_FOUND");

    let (status, _) = join(&app, &code, "Carol").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    join(&app, &code, "Bob").await;
    let (status, body) = join(&app, &code, "Bob").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error_code"], "INVALID_STATE_TRANSITION");
}

// =============================================================================
// Messaging
// =============================================================================

#[tokio::test]
async fn full_round_includes_mediator_reply() {
    let app = test_app(MockTextGenerator::new().with_response("I hear you both."));
    let (session_id, code) = create(&app).await;
    join(&app, &code, "Bob").await;

    let (status, body) = post(&app, &session_id, "Alice", "I feel unheard").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["next_turn"], "Bob");
    assert_eq!(body["mediation_triggered"], false);
    assert!(body.get("mediator_message").is_none());

    let (status, body) = post(&app, &session_id, "Bob", "I was busy").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["next_turn"], "Alice");
    assert_eq!(body["mediation_triggered"], true);
    assert_eq!(body["mediator_message"]["content"], "I hear you both.");
    assert_eq!(body["mediator_message"]["kind"], "mediator");

    let (_, body) = send(&app, "GET", &format!("/api/sessions/{}", session_id), None).await;
    let senders: Vec<_> = body["recent_messages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["sender_name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(senders, vec!["mediator", "Bob", "Alice"]);
}

#[tokio::test]
async fn wrong_turn_is_forbidden() {
    let app = test_app(MockTextGenerator::new());
    let (session_id, code) = create(&app).await;
    join(&app, &code, "Bob").await;

    let (status, body) = post(&app, &session_id, "Bob", "me first").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error_code"], "TURN_VIOLATION");
}

#[tokio::test]
async fn failed_mediation_is_bad_gateway() {
    let generator = MockTextGenerator::new().with_error(duke::adapters::ai::MockError::Unavailable {
        message: "model offline".to_string(),
    });
    let app = test_app(generator);
    let (session_id, code) = create(&app).await;
    join(&app, &code, "Bob").await;

    post(&app, &session_id, "Alice", "one").await;
    let (status, body) = post(&app, &session_id, "Bob", "two").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error_code"], "MEDIATION_FAILED");

    let (_, body) = send(&app, "GET", &format!("/api/sessions/{}", session_id), None).await;
    assert_eq!(body["current_turn"], "Alice");
}

#[tokio::test]
async fn unknown_session_is_not_found() {
    let app = test_app(MockTextGenerator::new());
    let missing = uuid::Uuid::new_v4();

    let (status, body) = send(&app, "GET", &format!("/api/sessions/{}", missing), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_code"], "SESSION_NOT_FOUND");

    let (status, _) = post(&app, &missing.to_string(), "Alice", "hello").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_session_id_is_bad_request() {
    let app = test_app(MockTextGenerator::new());
    let (status, _) = send(&app, "GET", "/api/sessions/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn root_reports_running() {
    let app = test_app(MockTextGenerator::new());
    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Duke API is running");
}

#[tokio::test]
async fn database_health_pings_store() {
    let app = test_app(MockTextGenerator::new());
    let (status, body) = send(&app, "GET", "/api/health/db", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
