//! Lifecycle notifications reported to the embedding application.
//!
//! Rendering reports `received_event`; each delivery reports either
//! `sent_message` followed by `received_reply`, or `error`.

use crate::error::DeliveryError;
use crate::types::{ReceivedEvent, RenderedMessage};

/// Hooks invoked as events are rendered and delivered.
///
/// Every hook defaults to a no-op so implementors only override what they need.
/// Delivery hooks fire from spawned tasks, hence `Send + Sync`.
pub trait NotificationObserver: Send + Sync {
    fn on_received_event(&self, _event: &ReceivedEvent) {}

    fn on_sent_message(&self, _message: &RenderedMessage) {}

    fn on_received_reply(&self, _reply: &serde_json::Value) {}

    fn on_error(&self, _error: &DeliveryError) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl NotificationObserver for NoopObserver {}

/// Default observer: writes every notification to the tracing subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl NotificationObserver for TracingObserver {
    fn on_received_event(&self, event: &ReceivedEvent) {
        tracing::debug!(
            event_type = %event.event_type,
            timestamp = event.timestamp.as_deref().unwrap_or("-"),
            "Received event"
        );
    }

    fn on_sent_message(&self, message: &RenderedMessage) {
        let title = message
            .attachments
            .first()
            .map(|a| a.title.as_str())
            .unwrap_or("");
        tracing::info!(title, projects = ?message.projects, "Sent message");
    }

    fn on_received_reply(&self, reply: &serde_json::Value) {
        tracing::info!(reply = %reply, "Received reply");
    }

    fn on_error(&self, error: &DeliveryError) {
        tracing::warn!(
            destination = error.destination(),
            error = %error,
            "Message delivery failed"
        );
    }
}
