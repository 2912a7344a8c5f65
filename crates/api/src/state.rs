//! Shared application state for the Axum callback listener.

use std::sync::Arc;

use herald_common::config::HeraldConfig;
use herald_common::observer::NotificationObserver;
use herald_notifier::{Dispatcher, WebhookTransport};
use herald_renderer::EventRenderer;

/// Application state shared across all route handlers via Axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<HeraldConfig>,
    pub renderer: Arc<EventRenderer>,
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    pub fn new(
        config: HeraldConfig,
        transport: Arc<dyn WebhookTransport>,
        observer: Arc<dyn NotificationObserver>,
    ) -> Self {
        let config = Arc::new(config);
        Self {
            renderer: Arc::new(EventRenderer::new(config.clone(), observer.clone())),
            dispatcher: Arc::new(Dispatcher::new(config.clone(), transport, observer)),
            config,
        }
    }
}
