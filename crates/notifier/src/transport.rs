//! Outbound webhook delivery.

use async_trait::async_trait;
use serde_json::Value;

use herald_common::error::DeliveryError;
use herald_common::types::RenderedMessage;

/// Label used for the default webhook in logs and errors.
pub const DEFAULT_DESTINATION: &str = "default";

/// A resolved delivery target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    /// Project name, or [`DEFAULT_DESTINATION`]
    pub name: String,
    pub url: String,
}

impl Destination {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Posts a JSON body to a webhook and returns the parsed reply.
#[async_trait]
pub trait WebhookTransport: Send + Sync {
    async fn post_json(
        &self,
        destination: &Destination,
        message: &RenderedMessage,
    ) -> Result<Value, DeliveryError>;
}

/// reqwest-backed transport.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WebhookTransport for HttpTransport {
    async fn post_json(
        &self,
        destination: &Destination,
        message: &RenderedMessage,
    ) -> Result<Value, DeliveryError> {
        // Strip the URL from reqwest errors: webhook URLs are credentials.
        let request_error = |e: reqwest::Error| DeliveryError::Request {
            destination: destination.name.clone(),
            message: e.without_url().to_string(),
        };

        let response = self
            .client
            .post(&destination.url)
            .json(message)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(DeliveryError::Status {
                destination: destination.name.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(request_error)?;
        Ok(parse_reply(body))
    }
}

/// Replies are JSON when possible; chat webhooks commonly answer plain `ok`.
fn parse_reply(body: String) -> Value {
    serde_json::from_str(&body).unwrap_or(Value::String(body))
}
