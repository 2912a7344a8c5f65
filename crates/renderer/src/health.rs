//! Group change and app health layouts.

use herald_common::types::{Attachment, Color};

use crate::attachment;
use crate::error::RenderError;
use crate::event::{
    FailedHealthCheck, GroupChange, HealthStatusChanged, HealthSubject, UnhealthyTaskKill,
};
use crate::timestamp::date_token;

pub(crate) fn render_group_change_success(event: &GroupChange) -> Result<Attachment, RenderError> {
    attachment(
        "Group change was completed.",
        "Group change completed",
        format!(
            "The group `{}` completed at {}.",
            event.group_id,
            date_token(&event.timestamp)?
        ),
        Color::Success,
        &event.timestamp,
    )
}

pub(crate) fn render_group_change_failed(event: &GroupChange) -> Result<Attachment, RenderError> {
    attachment(
        "Group change failed.",
        "Group change failed",
        format!(
            "The group `{}` failed at {}.",
            event.group_id,
            date_token(&event.timestamp)?
        ),
        Color::Failure,
        &event.timestamp,
    )
}

pub(crate) fn render_failed_health_check(
    event: &FailedHealthCheck,
) -> Result<Attachment, RenderError> {
    attachment(
        "App health check failed.",
        "App health check failed",
        format!(
            "The app `{}` (with task id `{}`) failed its health check at {}",
            event.app_id,
            event.task_id,
            date_token(&event.timestamp)?
        ),
        Color::Warning,
        &event.timestamp,
    )
}

pub(crate) fn render_health_status_changed(
    event: &HealthStatusChanged,
) -> Result<Attachment, RenderError> {
    let subject = match event.subject() {
        Some(HealthSubject::Instance(id)) => format!("with instance id `{id}`"),
        Some(HealthSubject::Task(id)) => format!("with task id `{id}`"),
        None => {
            return Err(RenderError::malformed(
                "health_status_changed_event",
                "missing field `taskId` or `instanceId`",
            ));
        }
    };
    let (status, color) = if event.alive {
        ("*healthy*", Color::Success)
    } else {
        ("*unhealthy*", Color::Failure)
    };

    attachment(
        "App health status changed.",
        "App health check status changed",
        format!(
            "The app `{}` ({}) changed its health check status at {} to {}",
            event.app_id,
            subject,
            date_token(&event.timestamp)?,
            status
        ),
        color,
        &event.timestamp,
    )
}

pub(crate) fn render_unhealthy_task_kill(
    event: &UnhealthyTaskKill,
) -> Result<Attachment, RenderError> {
    attachment(
        "Unhealthy task was killed.",
        "Unhealthy task was killed",
        format!(
            "The app `{}` had its task with id `{}` killed at {} due to an '{}' error",
            event.app_id,
            event.task_id,
            date_token(&event.timestamp)?,
            event.reason
        ),
        Color::Failure,
        &event.timestamp,
    )
}
