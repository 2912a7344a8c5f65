//! Routes rendered messages to their webhooks.
//!
//! A message naming projects goes to each project's webhook and never to the
//! default one; a message naming none goes to the default webhook only.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::task::JoinHandle;

use herald_common::config::HeraldConfig;
use herald_common::error::DeliveryError;
use herald_common::observer::NotificationObserver;
use herald_common::types::RenderedMessage;

use crate::transport::{DEFAULT_DESTINATION, Destination, WebhookTransport};

/// Fire-and-forget delivery of rendered messages.
pub struct Dispatcher {
    config: Arc<HeraldConfig>,
    transport: Arc<dyn WebhookTransport>,
    observer: Arc<dyn NotificationObserver>,
}

impl Dispatcher {
    pub fn new(
        config: Arc<HeraldConfig>,
        transport: Arc<dyn WebhookTransport>,
        observer: Arc<dyn NotificationObserver>,
    ) -> Self {
        Self {
            config,
            transport,
            observer,
        }
    }

    /// Resolve where `message` should be delivered.
    ///
    /// Each distinct project is delivered once, in first-seen order. A project
    /// without a configured webhook resolves to an error for that entry only.
    pub fn destinations(
        &self,
        message: &RenderedMessage,
    ) -> Vec<Result<Destination, DeliveryError>> {
        if message.projects.is_empty() {
            return vec![Ok(Destination::new(
                DEFAULT_DESTINATION,
                self.config.default_webhook.clone(),
            ))];
        }

        let mut seen = HashSet::new();
        message
            .projects
            .iter()
            .filter(|project| seen.insert(project.as_str()))
            .map(|project| match self.config.project_webhook(project) {
                Some(url) => Ok(Destination::new(project.clone(), url)),
                None => Err(DeliveryError::UnknownProject(project.clone())),
            })
            .collect()
    }

    /// Start one independent delivery per destination and return at once.
    ///
    /// Outcomes are reported to the observer as each delivery completes. The
    /// returned handles may be dropped; awaiting them waits for completion.
    /// Must be called from within a Tokio runtime.
    pub fn dispatch(&self, message: RenderedMessage) -> Vec<JoinHandle<()>> {
        let message = Arc::new(message);
        let mut handles = Vec::new();

        for destination in self.destinations(&message) {
            let destination = match destination {
                Ok(destination) => destination,
                Err(e) => {
                    self.observer.on_error(&e);
                    continue;
                }
            };

            tracing::debug!(
                destination = %destination.name,
                channel = %self.config.channel,
                "Dispatching message"
            );

            let transport = Arc::clone(&self.transport);
            let observer = Arc::clone(&self.observer);
            let message = Arc::clone(&message);

            handles.push(tokio::spawn(async move {
                match transport.post_json(&destination, &message).await {
                    Ok(reply) => {
                        tracing::debug!(destination = %destination.name, "Message delivered");
                        observer.on_sent_message(&message);
                        observer.on_received_reply(&reply);
                    }
                    Err(e) => observer.on_error(&e),
                }
            }));
        }

        handles
    }
}
