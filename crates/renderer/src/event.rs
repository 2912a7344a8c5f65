//! Classification of raw events into typed variants.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use herald_common::types::{Event, Plan, Step};

use crate::error::RenderError;

/// An orchestrator event with its payload parsed according to its type tag.
#[derive(Debug, Clone, PartialEq)]
pub enum OrchestratorEvent {
    DeploymentInfo(DeploymentInfo),
    DeploymentSuccess(DeploymentSuccess),
    DeploymentFailed(DeploymentFailed),
    DeploymentStepSuccess(DeploymentStep),
    DeploymentStepFailure(DeploymentStep),
    GroupChangeSuccess(GroupChange),
    GroupChangeFailed(GroupChange),
    FailedHealthCheck(FailedHealthCheck),
    HealthStatusChanged(HealthStatusChanged),
    UnhealthyTaskKill(UnhealthyTaskKill),
    StatusUpdate(StatusUpdate),
    /// Any type tag this renderer has no dedicated layout for.
    Unknown {
        event_type: String,
        timestamp: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentInfo {
    pub plan: Plan,
    pub current_step: Step,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeploymentSuccess {
    pub id: String,
    pub plan: Plan,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeploymentFailed {
    pub id: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeploymentStep {
    pub plan: Plan,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupChange {
    pub group_id: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedHealthCheck {
    pub app_id: String,
    pub task_id: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatusChanged {
    pub app_id: String,
    #[serde(default)]
    pub task_id: Option<String>,
    #[serde(default)]
    pub instance_id: Option<String>,
    pub alive: bool,
    pub timestamp: String,
}

/// Which identifier a health status change refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthSubject<'a> {
    Instance(&'a str),
    Task(&'a str),
}

impl HealthStatusChanged {
    /// The instance id when present and non-empty, else the task id.
    pub fn subject(&self) -> Option<HealthSubject<'_>> {
        match self.instance_id.as_deref().filter(|id| !id.is_empty()) {
            Some(instance) => Some(HealthSubject::Instance(instance)),
            None => self.task_id.as_deref().map(HealthSubject::Task),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnhealthyTaskKill {
    pub app_id: String,
    pub task_id: String,
    pub reason: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub app_id: String,
    pub task_id: String,
    pub task_status: String,
    pub timestamp: String,
}

impl OrchestratorEvent {
    /// Parse `event.data` according to `event.event_type`.
    ///
    /// Unrecognized types are never an error; recognized types whose payload
    /// lacks required fields are.
    pub fn classify(event: &Event) -> Result<Self, RenderError> {
        let classified = match event.event_type.as_str() {
            "deployment_info" => Self::DeploymentInfo(parse(event)?),
            "deployment_success" => Self::DeploymentSuccess(parse(event)?),
            "deployment_failed" => Self::DeploymentFailed(parse(event)?),
            "deployment_step_success" => Self::DeploymentStepSuccess(parse(event)?),
            "deployment_step_failure" => Self::DeploymentStepFailure(parse(event)?),
            "group_change_success" => Self::GroupChangeSuccess(parse(event)?),
            "group_change_failed" => Self::GroupChangeFailed(parse(event)?),
            "failed_health_check_event" => Self::FailedHealthCheck(parse(event)?),
            "health_status_changed_event" => Self::HealthStatusChanged(parse(event)?),
            "unhealthy_task_kill_event" => Self::UnhealthyTaskKill(parse(event)?),
            "status_update_event" => Self::StatusUpdate(parse(event)?),
            other => Self::Unknown {
                event_type: other.to_string(),
                timestamp: event.timestamp().map(str::to_string),
            },
        };
        Ok(classified)
    }

    /// The type tag this variant was classified from.
    pub fn event_type(&self) -> &str {
        match self {
            Self::DeploymentInfo(_) => "deployment_info",
            Self::DeploymentSuccess(_) => "deployment_success",
            Self::DeploymentFailed(_) => "deployment_failed",
            Self::DeploymentStepSuccess(_) => "deployment_step_success",
            Self::DeploymentStepFailure(_) => "deployment_step_failure",
            Self::GroupChangeSuccess(_) => "group_change_success",
            Self::GroupChangeFailed(_) => "group_change_failed",
            Self::FailedHealthCheck(_) => "failed_health_check_event",
            Self::HealthStatusChanged(_) => "health_status_changed_event",
            Self::UnhealthyTaskKill(_) => "unhealthy_task_kill_event",
            Self::StatusUpdate(_) => "status_update_event",
            Self::Unknown { event_type, .. } => event_type,
        }
    }
}

fn parse<T: DeserializeOwned>(event: &Event) -> Result<T, RenderError> {
    serde_json::from_value(event.data.clone())
        .map_err(|e| RenderError::malformed(&event.event_type, e.to_string()))
}
