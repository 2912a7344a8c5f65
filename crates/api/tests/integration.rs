//! Integration tests for the callback listener routes.
//!
//! Uses `tower::ServiceExt` to test Axum routes without a real HTTP server,
//! and an in-memory transport in place of the webhooks.
//!
//! ```bash
//! cargo test -p herald-api --test integration
//! ```

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use herald_api::routes::create_router;
use herald_api::state::AppState;
use herald_common::config::HeraldConfig;
use herald_common::error::DeliveryError;
use herald_common::observer::NoopObserver;
use herald_common::types::RenderedMessage;
use herald_notifier::{Destination, WebhookTransport};

// ============================================================
// Helpers
// ============================================================

const TS: &str = "2020-01-01T00:00:00.000Z";

#[derive(Default)]
struct RecordingTransport {
    posts: Mutex<Vec<(String, RenderedMessage)>>,
}

#[async_trait]
impl WebhookTransport for RecordingTransport {
    async fn post_json(
        &self,
        destination: &Destination,
        message: &RenderedMessage,
    ) -> Result<Value, DeliveryError> {
        self.posts
            .lock()
            .unwrap()
            .push((destination.url.clone(), message.clone()));
        Ok(json!("ok"))
    }
}

fn test_config() -> HeraldConfig {
    HeraldConfig::new("https://hooks.example.com/default")
        .with_project("payments", "https://hooks.example.com/payments")
}

fn build_test_state(transport: Arc<RecordingTransport>) -> AppState {
    AppState::new(test_config(), transport, Arc::new(NoopObserver))
}

fn post_event(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/events")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Deliveries run in spawned tasks; wait until `count` posts were recorded.
async fn wait_for_posts(transport: &RecordingTransport, count: usize) {
    for _ in 0..100 {
        if transport.posts.lock().unwrap().len() >= count {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("expected {count} posts");
}

// ============================================================
// Routes
// ============================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_router(build_test_state(Arc::default()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "herald-api");
    assert_eq!(json["channel"], "#marathon");
    assert_eq!(json["environment"], "Unknown");
    assert_eq!(json["region"], "Unknown");
    assert_eq!(json["projects"], json!(["payments"]));
    assert!(!json.to_string().contains("hooks.example.com"));
}

#[tokio::test]
async fn test_callback_event_goes_to_default_webhook() {
    let transport = Arc::new(RecordingTransport::default());
    let app = create_router(build_test_state(transport.clone()));

    let response = app
        .oneshot(post_event(json!({
            "eventType": "status_update_event",
            "appId": "/web",
            "taskId": "web.1",
            "taskStatus": "TASK_LOST",
            "timestamp": TS
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let json = json_body(response).await;
    assert_eq!(json["status"], "accepted");
    assert_eq!(json["event_type"], "status_update_event");
    assert_eq!(json["destinations"], 1);

    wait_for_posts(&transport, 1).await;
    let posts = transport.posts.lock().unwrap();
    assert_eq!(posts[0].0, "https://hooks.example.com/default");
    assert_eq!(
        posts[0].1.attachments[0].title,
        "Task Status Update - Task lost"
    );
}

#[tokio::test]
async fn test_deployment_success_routes_to_project() {
    let transport = Arc::new(RecordingTransport::default());
    let app = create_router(build_test_state(transport.clone()));

    let response = app
        .oneshot(post_event(json!({
            "type": "deployment_success",
            "data": {
                "id": "dep-1",
                "timestamp": TS,
                "plan": {
                    "id": "dep-1",
                    "steps": [{
                        "actions": [{"action": "RestartApplication", "app": "/payments/api"}]
                    }],
                    "target": {"apps": [], "groups": []}
                }
            }
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);

    wait_for_posts(&transport, 1).await;
    let posts = transport.posts.lock().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].0, "https://hooks.example.com/payments");
    assert_eq!(posts[0].1.projects, vec!["payments"]);
}

#[tokio::test]
async fn test_malformed_event_is_bad_request() {
    let transport = Arc::new(RecordingTransport::default());
    let app = create_router(build_test_state(transport.clone()));

    let response = app
        .oneshot(post_event(json!({"eventType": "deployment_failed", "timestamp": TS})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert!(json["error"].as_str().unwrap().contains("deployment_failed"));
    assert!(transport.posts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_untyped_body_is_bad_request() {
    let app = create_router(build_test_state(Arc::default()));

    let response = app
        .oneshot(post_event(json!({"hello": "world"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
