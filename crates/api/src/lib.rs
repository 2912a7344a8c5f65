//! HTTP listener for orchestrator event callbacks.
//!
//! - `POST /events` — render one event and dispatch it to its webhooks
//! - `GET  /health` — liveness

pub mod routes;
pub mod state;
