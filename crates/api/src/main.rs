//! herald callback listener binary entrypoint.

use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use herald_common::config::HeraldConfig;
use herald_common::observer::TracingObserver;
use herald_notifier::HttpTransport;

use herald_api::routes::create_router;
use herald_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(
                "herald_api=info,herald_notifier=info,herald_renderer=debug,tower_http=info",
            )
        }))
        .init();

    tracing::info!("Starting herald event listener...");

    // Load configuration
    let config = HeraldConfig::from_env()?;
    let addr = config.listen_addr;
    tracing::info!(
        channel = %config.channel,
        projects = config.projects.len(),
        environment = %config.environment,
        region = %config.region,
        "Configuration loaded"
    );

    // Build application state
    let state = AppState::new(
        config,
        Arc::new(HttpTransport::new()),
        Arc::new(TracingObserver),
    );

    let app = create_router(state).layer(TraceLayer::new_for_http());

    tracing::info!("Listening for events on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Received shutdown signal, stopping gracefully...");
        })
        .await?;

    tracing::info!("herald event listener stopped.");
    Ok(())
}
