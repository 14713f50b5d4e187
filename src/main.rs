// Main entry point - Dependency injection and server setup
use std::sync::Arc;

use learning_dashboard::application::view_aggregator::ViewAggregator;
use learning_dashboard::infrastructure::config::load_app_config;
use learning_dashboard::infrastructure::metrics_client::HttpMetricsClient;
use learning_dashboard::presentation::app_state::AppState;
use learning_dashboard::presentation::router::build_router;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Create metrics client (infrastructure layer)
    let client = Arc::new(HttpMetricsClient::new(config.api.base_url.clone()));

    // Create view aggregator (application layer)
    let aggregator = ViewAggregator::with_params(
        client,
        config.view.mode,
        config.view.commit_policy,
        config.view.initial_params(),
    );

    // Initial fetch, the way a freshly mounted view loads
    aggregator.spawn_refresh(None);

    let state = Arc::new(AppState { aggregator });
    let router = build_router(state.clone());

    // Start server
    let addr = config.server.bind_addr;
    tracing::info!(
        %addr,
        api = %config.api.base_url,
        mode = ?state.aggregator.mode(),
        "starting learning-dashboard"
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
