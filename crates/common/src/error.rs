use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced by the callback listener.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Render error: {0}")]
    Render(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Render(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        let body = json!({ "error": message });
        (status, Json(body)).into_response()
    }
}

/// Failure delivering a message to one destination webhook.
///
/// `destination` is the project name, or `default` for the default webhook.
/// Webhook URLs are never included since they act as credentials.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    #[error("request to {destination} webhook failed: {message}")]
    Request {
        destination: String,
        message: String,
    },

    #[error("{destination} webhook replied with status {status}")]
    Status { destination: String, status: u16 },

    #[error("no webhook configured for project {0}")]
    UnknownProject(String),
}

impl DeliveryError {
    /// The destination this failure belongs to.
    pub fn destination(&self) -> &str {
        match self {
            DeliveryError::Request { destination, .. } => destination,
            DeliveryError::Status { destination, .. } => destination,
            DeliveryError::UnknownProject(project) => project,
        }
    }
}
