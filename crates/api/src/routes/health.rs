//! Health check endpoint.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// GET /health — Liveness plus the deployment labels this listener reports.
///
/// Webhook URLs are credentials and are never echoed; only the project names.
async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let mut projects: Vec<&str> = state.config.projects.keys().map(String::as_str).collect();
    projects.sort_unstable();

    Json(json!({
        "status": "ok",
        "service": "herald-api",
        "version": env!("CARGO_PKG_VERSION"),
        "channel": state.config.channel,
        "environment": state.config.environment,
        "region": state.config.region,
        "projects": projects
    }))
}
