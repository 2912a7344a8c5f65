use std::collections::HashMap;
use std::net::SocketAddr;

use serde::Deserialize;

/// Icon shown next to the bot's messages unless overridden.
pub const DEFAULT_ICON_URL: &str = "http://i.imgur.com/5FJDbGz.png";

/// Process configuration, read-only after construction.
#[derive(Debug, Clone, Deserialize)]
pub struct HeraldConfig {
    /// Webhook receiving every message that is not routed to a project
    pub default_webhook: String,

    /// Channel the default webhook posts into (default: `#marathon`)
    pub channel: String,

    /// Display name of the bot (default: `Marathon Event Bot`)
    pub bot_name: String,

    /// Environment label shown in deployment summaries
    pub environment: String,

    /// Region label shown in deployment summaries
    pub region: String,

    /// Project name → override webhook URL
    #[serde(default)]
    pub projects: HashMap<String, String>,

    /// Icon URL attached to every message
    pub icon_url: String,

    /// Address the callback listener binds to (default: `0.0.0.0:3000`)
    pub listen_addr: SocketAddr,
}

impl HeraldConfig {
    /// Configuration with defaults for everything but the default webhook.
    pub fn new(default_webhook: impl Into<String>) -> Self {
        Self {
            default_webhook: default_webhook.into(),
            channel: "#marathon".to_string(),
            bot_name: "Marathon Event Bot".to_string(),
            environment: "Unknown".to_string(),
            region: "Unknown".to_string(),
            projects: HashMap::new(),
            icon_url: DEFAULT_ICON_URL.to_string(),
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
        }
    }

    /// Add a project override webhook.
    pub fn with_project(mut self, name: impl Into<String>, webhook: impl Into<String>) -> Self {
        self.projects.insert(name.into(), webhook.into());
        self
    }

    /// Webhook URL configured for `project`, if any.
    pub fn project_webhook(&self, project: &str) -> Option<&str> {
        self.projects.get(project).map(String::as_str)
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let default_webhook = std::env::var("SLACK_WEBHOOK_URL")
            .map_err(|_| anyhow::anyhow!("SLACK_WEBHOOK_URL environment variable is required"))?;
        let defaults = Self::new(default_webhook);

        Ok(Self {
            channel: std::env::var("SLACK_CHANNEL").unwrap_or(defaults.channel.clone()),
            bot_name: std::env::var("SLACK_BOT_NAME").unwrap_or(defaults.bot_name.clone()),
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment.clone()),
            region: std::env::var("REGION").unwrap_or(defaults.region.clone()),
            projects: match std::env::var("PROJECTS") {
                Ok(raw) => parse_projects(&raw)?,
                Err(_) => HashMap::new(),
            },
            icon_url: std::env::var("SLACK_ICON_URL").unwrap_or(defaults.icon_url.clone()),
            listen_addr: match std::env::var("LISTEN_ADDR") {
                Ok(raw) => raw
                    .parse()
                    .map_err(|_| anyhow::anyhow!("LISTEN_ADDR must be a valid socket address"))?,
                Err(_) => defaults.listen_addr,
            },
            ..defaults
        })
    }
}

/// Parse the `PROJECTS` variable: a JSON object of project name → webhook URL.
pub fn parse_projects(raw: &str) -> anyhow::Result<HashMap<String, String>> {
    if raw.trim().is_empty() {
        return Ok(HashMap::new());
    }
    serde_json::from_str(raw).map_err(|e| {
        anyhow::anyhow!("PROJECTS must be a JSON object of project name to webhook URL: {e}")
    })
}
