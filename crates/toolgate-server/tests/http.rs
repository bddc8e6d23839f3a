//! End-to-end HTTP tests driving the router in-process.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use toolgate_core::{HeuristicClassifier, Orchestrator};
use toolgate_server::{AppState, router};
use toolgate_test_utils::{
    FailingStore, RecordingSleeper, dispatcher_with, seeded_dispatcher, seeded_store, shared_store,
};
use toolgate_tools::{KnowledgeBase, RetryPolicy, ToolDispatcher, ToolServices};
use tower::ServiceExt;

fn app_with(dispatcher: ToolDispatcher) -> Router {
    let classifier = Arc::new(HeuristicClassifier::new().expect("classifier"));
    router(
        AppState::new(Orchestrator::new(dispatcher, classifier)),
        Duration::from_secs(5),
    )
}

fn app() -> Router {
    app_with(seeded_dispatcher())
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

#[tokio::test]
async fn health_reports_service() {
    let (status, body) = send(app(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok", "service": "toolgate" }));
}

#[tokio::test]
async fn tools_are_listed_in_order() {
    let (status, body) = send(app(), get("/tools")).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .expect("array")
        .iter()
        .map(|tool| tool["name"].as_str().expect("name"))
        .collect();
    assert_eq!(names, vec!["ticket_search", "kb_lookup", "db_query"]);
    assert_eq!(body[0]["version"], "1.0.0");
    assert_eq!(body[2]["input_schema"]["required"], json!(["sql"]));
}

#[tokio::test]
async fn tool_call_returns_result_and_duration() {
    let (status, body) = send(
        app(),
        post("/tool/ticket_search", json!({ "arguments": { "query": "payment" } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"].as_array().expect("rows").len(), 2);
    assert_eq!(body["error"], Value::Null);
    assert!(body["meta"]["duration_seconds"].as_f64().expect("duration") >= 0.0);
}

#[tokio::test]
async fn unknown_tool_is_404() {
    let (status, body) = send(app(), post("/tool/nonexistent_tool", json!({ "arguments": {} }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "Tool nonexistent_tool not found" }));
}

#[tokio::test]
async fn unsafe_sql_is_400() {
    let (status, body) = send(
        app(),
        post(
            "/tool/db_query",
            json!({ "arguments": { "sql": "UPDATE tickets SET status='CLOSED'" } }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().expect("detail").contains("forbidden keyword"));
}

#[tokio::test]
async fn malformed_requests_are_400() {
    let (status, _) = send(
        app(),
        post("/tool/kb_lookup", json!({ "arguments": { "topic": 7 } })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        app(),
        post("/tool/kb_lookup", json!({ "arguments": ["mcp"] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "arguments must be an object");

    let (status, _) = send(
        app(),
        post(
            "/tool/kb_lookup",
            json!({ "tool_name": "db_query", "arguments": { "topic": "mcp" } }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let request = Request::builder()
        .method("POST")
        .uri("/agent/run")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .expect("request");
    let (status, body) = send(app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn store_failure_is_500() {
    let services = ToolServices::new(shared_store(FailingStore::new("disk on fire")));
    let (status, body) = send(
        app_with(dispatcher_with(services)),
        post("/tool/ticket_search", json!({ "arguments": { "query": "x" } })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].as_str().expect("detail").contains("disk on fire"));
}

#[tokio::test]
async fn agent_run_routes_ticket_queries() {
    let (status, body) = send(
        app(),
        post("/agent/run", json!({ "query": "Find tickets regarding login" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let answer = body["answer"].as_str().expect("answer");
    assert!(answer.contains("Found") || answer.contains("tickets"));
    assert_eq!(body["tool_calls"][0]["tool"], "ticket_search");
}

#[tokio::test]
async fn agent_failures_are_500() {
    let sleeper = Arc::new(RecordingSleeper::new());
    let services = ToolServices::new(shared_store(seeded_store()))
        .with_knowledge(KnowledgeBase::builtin().with_failure_rate(1.0))
        .with_retry(RetryPolicy::new(3, Duration::from_millis(10)).with_sleeper(sleeper.clone()));
    let (status, body) = send(
        app_with(dispatcher_with(services)),
        post("/agent/run", json!({ "query": "explain mcp" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "KB Service temporarily unavailable");
    assert_eq!(sleeper.count(), 2);
}

#[tokio::test]
async fn request_deadline_returns_408() {
    let services = ToolServices::new(shared_store(seeded_store()))
        .with_knowledge(KnowledgeBase::builtin().with_failure_rate(1.0))
        .with_retry(RetryPolicy::new(5, Duration::from_secs(30)));
    let classifier = Arc::new(HeuristicClassifier::new().expect("classifier"));
    let app = router(
        AppState::new(Orchestrator::new(dispatcher_with(services), classifier)),
        Duration::from_millis(50),
    );
    let (status, _) = send(app, post("/tool/kb_lookup", json!({ "arguments": { "topic": "mcp" } }))).await;
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
}
