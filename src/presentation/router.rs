use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    dashboard_events, dashboard_summary, get_dashboard, health_check, refresh_dashboard,
    update_params,
};
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    // Event streams are excluded by the default compression predicate
    Router::new()
        .route("/healthz", get(health_check))
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/refresh", post(refresh_dashboard))
        .route("/dashboard/params", put(update_params))
        .route("/dashboard/summary", get(dashboard_summary))
        .route("/dashboard/events", get(dashboard_events))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
