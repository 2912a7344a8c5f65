//! Event callback intake.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};

use herald_common::error::AppError;
use herald_common::types::Event;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/events", post(receive_event))
}

/// POST /events — Render an event and hand it to the dispatcher.
///
/// Accepts the orchestrator's flat callback body (`{"eventType": ...}`) or a
/// tagged `{"type": ..., "data": {...}}` event. Replies once the message is
/// rendered; delivery continues in the background.
async fn receive_event(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let event = parse_event(body)?;

    let message = state.renderer.render(&event).map_err(|e| {
        tracing::warn!(event_type = %event.event_type, error = %e, "Rejected event");
        AppError::Render(e.to_string())
    })?;

    let destinations = state.dispatcher.dispatch(message).len();

    Ok((
        StatusCode::ACCEPTED,
        Json(json!({
            "status": "accepted",
            "event_type": event.event_type,
            "destinations": destinations
        })),
    ))
}

fn parse_event(body: Value) -> Result<Event, AppError> {
    if body.get("eventType").is_some() {
        return Event::from_callback(body)
            .ok_or_else(|| AppError::Validation("eventType must be a string".to_string()));
    }
    serde_json::from_value(body).map_err(|_| {
        AppError::Validation("body must carry eventType, or type and data".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_callback_body() {
        let event = parse_event(json!({"eventType": "deployment_failed", "id": "d"})).unwrap();
        assert_eq!(event.event_type, "deployment_failed");
        assert_eq!(event.data["id"], "d");
    }

    #[test]
    fn test_parse_tagged_body() {
        let event = parse_event(json!({"type": "group_change_success", "data": {"groupId": "/g"}}))
            .unwrap();
        assert_eq!(event.event_type, "group_change_success");
        assert_eq!(event.data, json!({"groupId": "/g"}));
    }

    #[test]
    fn test_parse_rejects_untyped_body() {
        assert!(matches!(
            parse_event(json!({"id": "d"})),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            parse_event(json!({"eventType": 3})),
            Err(AppError::Validation(_))
        ));
    }
}
