//! Deployment lifecycle layouts, including the deployment summary that
//! resolves scale targets and routes messages to project webhooks.

use herald_common::config::HeraldConfig;
use herald_common::types::{Action, Attachment, AttachmentField, Color, Plan, PlanTarget};

use crate::error::RenderError;
use crate::event::{DeploymentFailed, DeploymentInfo, DeploymentStep, DeploymentSuccess};
use crate::timestamp::date_token;
use crate::{attachment, with_fields};

pub(crate) fn render_info(event: &DeploymentInfo) -> Result<Attachment, RenderError> {
    let first = event
        .current_step
        .actions
        .first()
        .ok_or_else(|| RenderError::malformed("deployment_info", "current step has no actions"))?;

    let text = format!(
        "The deployment `{}` triggered step `{}` of the following steps:",
        event.plan.id,
        first.label()
    );
    let base = attachment(
        "Deployment was triggered.",
        "Deployment info",
        text,
        Color::Info,
        &event.timestamp,
    )?;
    Ok(with_fields(base, action_fields(&event.plan)))
}

/// Deployment summary plus the projects it should be routed to.
pub(crate) fn render_success(
    event: &DeploymentSuccess,
    config: &HeraldConfig,
) -> Result<(Attachment, Vec<String>), RenderError> {
    let mut text = format!(
        "The deployment `{}` was completed successfully at {}",
        event.id,
        date_token(&event.timestamp)?
    );
    text.push_str("\nApps affected:");

    let mut projects = Vec::new();
    for (index, action) in event.plan.actions().enumerate() {
        let path = AppPath::parse(&action.app);

        if let Some(project) = path.project.filter(|p| config.projects.contains_key(*p)) {
            projects.push(project.to_string());
        }

        if index > 0 {
            text.push_str("\n\t");
        }
        text.push_str(&format!(
            "\t{}) `{}` {}",
            index + 1,
            action.app,
            describe_effect(action, &path, &event.plan.target)
        ));
    }

    text.push_str(&format!("\nEnvironment: `{}`", config.environment));
    text.push_str(&format!("\nRegion: `{}`", config.region));

    let attachment = attachment(
        "Deployment was successful.",
        "Deployment success",
        text,
        Color::Success,
        &event.timestamp,
    )?;
    Ok((attachment, projects))
}

pub(crate) fn render_failed(event: &DeploymentFailed) -> Result<Attachment, RenderError> {
    attachment(
        "Deployment failed.",
        "Deployment failed",
        format!(
            "The deployment `{}` failed at {}",
            event.id,
            date_token(&event.timestamp)?
        ),
        Color::Failure,
        &event.timestamp,
    )
}

pub(crate) fn render_step_success(event: &DeploymentStep) -> Result<Attachment, RenderError> {
    let base = attachment(
        "Deployment step was completed.",
        "Deployment step(s) success",
        format!(
            "The deployment `{}` completed the following steps:",
            event.plan.id
        ),
        Color::Success,
        &event.timestamp,
    )?;
    Ok(with_fields(base, action_fields(&event.plan)))
}

pub(crate) fn render_step_failure(event: &DeploymentStep) -> Result<Attachment, RenderError> {
    let base = attachment(
        "Deployment step failed.",
        "Deployment step(s) failed",
        format!(
            "The deployment `{}` failed at the following steps:",
            event.plan.id
        ),
        Color::Failure,
        &event.timestamp,
    )?;
    Ok(with_fields(base, action_fields(&event.plan)))
}

/// One numbered field per action across all plan steps.
fn action_fields(plan: &Plan) -> Vec<AttachmentField> {
    plan.actions()
        .enumerate()
        .map(|(index, action)| AttachmentField {
            title: format!("{}. {}", index + 1, action.label()),
            value: action.app.clone(),
            short: true,
        })
        .collect()
}

/// Group and project derived from an app path.
///
/// `/proj/svc` lives in group `/proj` and belongs to project `proj`;
/// `/svc` lives in the root group `/` and has no project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPath<'a> {
    pub group: String,
    pub project: Option<&'a str>,
}

impl<'a> AppPath<'a> {
    pub fn parse(app: &'a str) -> Self {
        let segments: Vec<&str> = app.split('/').collect();
        if segments.len() > 2 {
            Self {
                group: format!("/{}", segments[1]),
                project: Some(segments[1]),
            }
        } else {
            Self {
                group: "/".to_string(),
                project: None,
            }
        }
    }

    pub fn is_root(&self) -> bool {
        self.group == "/"
    }
}

fn describe_effect(action: &Action, path: &AppPath<'_>, target: &PlanTarget) -> String {
    match action.action.as_deref() {
        Some("RestartApplication") => "was restarted".to_string(),
        Some("ScaleApplication") => format!(
            "was scaled to {} instances",
            target_instances(target, path, &action.app)
        ),
        _ => format!("was {}", action.label()),
    }
}

/// Instance count the deployment targets for `app`, 0 when it is not listed.
///
/// Root apps are looked up in the target's top-level apps. Grouped apps are
/// looked up in their group only; the top-level apps are consulted when no
/// group with that id exists.
pub fn target_instances(target: &PlanTarget, path: &AppPath<'_>, app: &str) -> u64 {
    let top_level = || target.apps.iter().find(|a| a.id == app);

    let found = if path.is_root() {
        top_level()
    } else {
        match target.groups.iter().find(|g| g.id == path.group) {
            Some(group) => group.apps.iter().find(|a| a.id == app),
            None => top_level(),
        }
    };

    found.map(|a| a.instances).unwrap_or(0)
}
