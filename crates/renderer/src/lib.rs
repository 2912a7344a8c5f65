//! Renders orchestrator lifecycle events into chat notification messages.
//!
//! Rendering is pure apart from the `received_event` notification: the same
//! event always yields the same message, and the only configuration consulted
//! is read-only.

pub mod deployment;
pub mod error;
pub mod event;
pub mod health;
pub mod task;
pub mod timestamp;

use std::sync::Arc;

use herald_common::config::HeraldConfig;
use herald_common::observer::NotificationObserver;
use herald_common::types::{
    Attachment, AttachmentField, Color, Event, ReceivedEvent, RenderedMessage,
};

pub use crate::error::RenderError;
pub use crate::event::OrchestratorEvent;

/// Maps events to messages and project routing hints.
pub struct EventRenderer {
    config: Arc<HeraldConfig>,
    observer: Arc<dyn NotificationObserver>,
}

impl EventRenderer {
    pub fn new(config: Arc<HeraldConfig>, observer: Arc<dyn NotificationObserver>) -> Self {
        Self { config, observer }
    }

    /// Report the event to the observer, then render it.
    pub fn render(&self, event: &Event) -> Result<RenderedMessage, RenderError> {
        self.observer.on_received_event(&ReceivedEvent::from(event));

        let classified = OrchestratorEvent::classify(event)?;
        let message = self.render_classified(&classified)?;

        tracing::debug!(
            event_type = classified.event_type(),
            projects = message.projects.len(),
            "Rendered event"
        );
        Ok(message)
    }

    /// Render an already classified event. No notification is emitted.
    pub fn render_classified(
        &self,
        event: &OrchestratorEvent,
    ) -> Result<RenderedMessage, RenderError> {
        let mut projects = Vec::new();

        let attachment = match event {
            OrchestratorEvent::DeploymentInfo(e) => deployment::render_info(e)?,
            OrchestratorEvent::DeploymentSuccess(e) => {
                let (attachment, routed) = deployment::render_success(e, &self.config)?;
                projects = routed;
                attachment
            }
            OrchestratorEvent::DeploymentFailed(e) => deployment::render_failed(e)?,
            OrchestratorEvent::DeploymentStepSuccess(e) => deployment::render_step_success(e)?,
            OrchestratorEvent::DeploymentStepFailure(e) => deployment::render_step_failure(e)?,
            OrchestratorEvent::GroupChangeSuccess(e) => health::render_group_change_success(e)?,
            OrchestratorEvent::GroupChangeFailed(e) => health::render_group_change_failed(e)?,
            OrchestratorEvent::FailedHealthCheck(e) => health::render_failed_health_check(e)?,
            OrchestratorEvent::HealthStatusChanged(e) => health::render_health_status_changed(e)?,
            OrchestratorEvent::UnhealthyTaskKill(e) => health::render_unhealthy_task_kill(e)?,
            OrchestratorEvent::StatusUpdate(e) => task::render_status_update(e)?,
            OrchestratorEvent::Unknown {
                event_type,
                timestamp,
            } => render_unknown(event_type, timestamp.as_deref()),
        };

        Ok(RenderedMessage {
            username: self.config.bot_name.clone(),
            icon_url: self.config.icon_url.clone(),
            markdown: true,
            attachments: vec![attachment],
            projects,
        })
    }
}

/// Generic layout for unrecognized types. Never fails: a missing or
/// unparsable timestamp only drops `ts`.
fn render_unknown(event_type: &str, timestamp: Option<&str>) -> Attachment {
    let title = format!("Event type {event_type} received.");
    Attachment {
        fallback: title.clone(),
        title,
        text: format!("An event of type {event_type} was received."),
        color: Color::Info.to_string(),
        fields: None,
        markdown_fields: vec!["text".to_string()],
        timestamp: timestamp.and_then(|t| timestamp::to_unix_timestamp(t).ok()),
    }
}

/// Text-only attachment stamped with the event's own time.
pub(crate) fn attachment(
    fallback: &str,
    title: &str,
    text: String,
    color: Color,
    timestamp: &str,
) -> Result<Attachment, RenderError> {
    Ok(Attachment {
        fallback: fallback.to_string(),
        title: title.to_string(),
        text,
        color: color.to_string(),
        fields: None,
        markdown_fields: vec!["text".to_string()],
        timestamp: Some(timestamp::to_unix_timestamp(timestamp)?),
    })
}

pub(crate) fn with_fields(attachment: Attachment, fields: Vec<AttachmentField>) -> Attachment {
    Attachment {
        fields: Some(fields),
        ..attachment
    }
}
