use serde::{Deserialize, Serialize};

/// A raw lifecycle event emitted by the orchestrator.
///
/// `event_type` is the tag (`deployment_info`, `status_update_event`, ...) and
/// `data` carries the tag-specific payload, left untyped until classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: serde_json::Value,
}

impl Event {
    pub fn new(event_type: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            event_type: event_type.into(),
            data,
        }
    }

    /// Build an event from a flat HTTP callback body (`{"eventType": ..., ...}`).
    ///
    /// The whole body becomes `data`. Returns `None` when `eventType` is absent
    /// or not a string.
    pub fn from_callback(body: serde_json::Value) -> Option<Self> {
        let event_type = body.get("eventType")?.as_str()?.to_string();
        Some(Self {
            event_type,
            data: body,
        })
    }

    /// The event's own timestamp, if it carries one.
    pub fn timestamp(&self) -> Option<&str> {
        self.data.get("timestamp").and_then(|v| v.as_str())
    }
}

/// Deployment execution plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub target: PlanTarget,
}

impl Plan {
    /// All actions across all steps, in plan order.
    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.steps.iter().flat_map(|step| step.actions.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    #[serde(default)]
    pub actions: Vec<Action>,
}

/// A single action of a plan step against one app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Action verb, e.g. `ScaleApplication`.
    #[serde(default)]
    pub action: Option<String>,
    pub app: String,
    #[serde(default, rename = "type")]
    pub action_type: Option<String>,
}

impl Action {
    /// Display label: the verb, else the action type, else `"Step"`.
    pub fn label(&self) -> &str {
        self.action
            .as_deref()
            .or(self.action_type.as_deref())
            .unwrap_or("Step")
    }
}

/// Desired end state of a deployment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanTarget {
    #[serde(default)]
    pub apps: Vec<AppTarget>,
    #[serde(default)]
    pub groups: Vec<Group>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppTarget {
    pub id: String,
    #[serde(default)]
    pub instances: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    #[serde(default)]
    pub apps: Vec<AppTarget>,
}

/// Attachment color by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Info,
    Success,
    Failure,
    Warning,
}

impl Color {
    pub fn hex(&self) -> &'static str {
        match self {
            Color::Info => "#0066cc",
            Color::Success => "#7CD197",
            Color::Failure => "#ff0000",
            Color::Warning => "#ff9900",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.hex())
    }
}

/// One row of an attachment's field table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentField {
    pub title: String,
    pub value: String,
    pub short: bool,
}

/// A styled block within a chat notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub fallback: String,
    pub title: String,
    pub text: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<AttachmentField>>,
    #[serde(rename = "mrkdwn_in")]
    pub markdown_fields: Vec<String>,
    /// Unix seconds of the source event. Absent only for unrecognized events
    /// that carry no timestamp.
    #[serde(rename = "ts", default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

/// Chat notification payload, posted as-is to every destination webhook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedMessage {
    pub username: String,
    pub icon_url: String,
    #[serde(rename = "mrkdwn")]
    pub markdown: bool,
    pub attachments: Vec<Attachment>,
    /// Projects whose dedicated webhook should receive this message.
    /// Empty means the default webhook only.
    #[serde(default)]
    pub projects: Vec<String>,
}

/// Payload of the `received_event` notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceivedEvent {
    pub timestamp: Option<String>,
    pub event_type: String,
    pub data: serde_json::Value,
}

impl From<&Event> for ReceivedEvent {
    fn from(event: &Event) -> Self {
        Self {
            timestamp: event.timestamp().map(str::to_string),
            event_type: event.event_type.clone(),
            data: event.data.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_from_callback() {
        let event = Event::from_callback(json!({
            "eventType": "deployment_failed",
            "id": "dep-1",
            "timestamp": "2020-01-01T00:00:00.000Z"
        }))
        .unwrap();
        assert_eq!(event.event_type, "deployment_failed");
        assert_eq!(event.data["id"], "dep-1");
        assert_eq!(event.timestamp(), Some("2020-01-01T00:00:00.000Z"));
    }

    #[test]
    fn test_event_from_callback_without_type() {
        assert!(Event::from_callback(json!({"id": "dep-1"})).is_none());
        assert!(Event::from_callback(json!({"eventType": 7})).is_none());
    }

    #[test]
    fn test_action_label_fallbacks() {
        let action: Action = serde_json::from_value(json!({
            "action": "ScaleApplication",
            "app": "/a"
        }))
        .unwrap();
        assert_eq!(action.label(), "ScaleApplication");

        let action: Action =
            serde_json::from_value(json!({"type": "StartApplication", "app": "/a"})).unwrap();
        assert_eq!(action.label(), "StartApplication");

        let action: Action = serde_json::from_value(json!({"app": "/a"})).unwrap();
        assert_eq!(action.label(), "Step");
    }

    #[test]
    fn test_plan_actions_flatten_in_order() {
        let plan: Plan = serde_json::from_value(json!({
            "id": "p",
            "steps": [
                {"actions": [{"action": "A", "app": "/1"}, {"action": "B", "app": "/2"}]},
                {"actions": [{"action": "C", "app": "/3"}]}
            ]
        }))
        .unwrap();
        let apps: Vec<&str> = plan.actions().map(|a| a.app.as_str()).collect();
        assert_eq!(apps, vec!["/1", "/2", "/3"]);
        assert!(plan.target.apps.is_empty());
    }

    #[test]
    fn test_message_wire_names() {
        let message = RenderedMessage {
            username: "bot".to_string(),
            icon_url: "http://icon".to_string(),
            markdown: true,
            attachments: vec![Attachment {
                fallback: "f".to_string(),
                title: "t".to_string(),
                text: "x".to_string(),
                color: Color::Info.to_string(),
                fields: None,
                markdown_fields: vec!["text".to_string()],
                timestamp: Some(1),
            }],
            projects: vec!["p1".to_string()],
        };
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["mrkdwn"], true);
        assert_eq!(value["icon_url"], "http://icon");
        assert_eq!(value["projects"][0], "p1");
        assert_eq!(value["attachments"][0]["mrkdwn_in"][0], "text");
        assert_eq!(value["attachments"][0]["ts"], 1);
        assert_eq!(value["attachments"][0]["color"], "#0066cc");
        assert!(value["attachments"][0].get("fields").is_none());
    }
}
