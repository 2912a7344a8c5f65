//! Webhook delivery of rendered notification messages.

pub mod dispatcher;
pub mod transport;

pub use dispatcher::Dispatcher;
pub use transport::{Destination, HttpTransport, WebhookTransport};
