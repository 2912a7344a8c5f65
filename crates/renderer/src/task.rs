//! Task status update layout.

use herald_common::types::{Attachment, Color};

use crate::attachment;
use crate::error::RenderError;
use crate::event::StatusUpdate;
use crate::timestamp::date_token;

/// Task states reported by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Failed,
    Killed,
    Lost,
    Running,
    Killing,
    Finished,
    Staging,
    Starting,
}

impl TaskStatus {
    /// Parse a status code, with or without the `TASK_` prefix.
    pub fn parse(code: &str) -> Option<Self> {
        let status = match code.strip_prefix("TASK_").unwrap_or(code) {
            "FAILED" => TaskStatus::Failed,
            "KILLED" => TaskStatus::Killed,
            "LOST" => TaskStatus::Lost,
            "RUNNING" => TaskStatus::Running,
            "KILLING" => TaskStatus::Killing,
            "FINISHED" => TaskStatus::Finished,
            "STAGING" => TaskStatus::Staging,
            "STARTING" => TaskStatus::Starting,
            _ => return None,
        };
        Some(status)
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Failed => "Task failed",
            TaskStatus::Killed => "Task killed",
            TaskStatus::Lost => "Task lost",
            TaskStatus::Running => "Task running",
            TaskStatus::Killing => "Task killing",
            TaskStatus::Finished => "Task finished",
            TaskStatus::Staging => "Task staging",
            TaskStatus::Starting => "Task starting",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            TaskStatus::Failed | TaskStatus::Killed | TaskStatus::Lost => Color::Failure,
            TaskStatus::Running => Color::Success,
            TaskStatus::Killing
            | TaskStatus::Finished
            | TaskStatus::Staging
            | TaskStatus::Starting => Color::Info,
        }
    }
}

pub(crate) fn render_status_update(event: &StatusUpdate) -> Result<Attachment, RenderError> {
    let (label, color) = match TaskStatus::parse(&event.task_status) {
        Some(status) => (status.label(), status.color()),
        None => (event.task_status.as_str(), Color::Info),
    };
    let title = format!("Task Status Update - {label}");

    attachment(
        &title,
        &title,
        format!(
            "The app `{}` (with task id `{}`) changed its status to `{}` at {}",
            event.app_id,
            event.task_id,
            event.task_status,
            date_token(&event.timestamp)?
        ),
        color,
        &event.timestamp,
    )
}
