use thiserror::Error;

/// Faults raised while rendering an event.
///
/// These indicate the orchestrator sent an event that does not match the
/// shape its type promises; they are returned to the caller unrecovered.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("malformed {event_type} event: {message}")]
    MalformedEvent { event_type: String, message: String },

    #[error("invalid event timestamp {0:?}")]
    InvalidTimestamp(String),
}

impl RenderError {
    pub(crate) fn malformed(event_type: &str, message: impl Into<String>) -> Self {
        RenderError::MalformedEvent {
            event_type: event_type.to_string(),
            message: message.into(),
        }
    }
}
