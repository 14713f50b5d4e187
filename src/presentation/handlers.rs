// HTTP request handlers
use crate::domain::dashboard::DashboardParams;
use crate::domain::insights::DashboardSummary;
use crate::domain::view_state::ViewSnapshot;
use crate::presentation::app_state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    Json,
};
use futures::stream::Stream;
use serde_json::json;
use std::convert::Infallible;
use std::sync::Arc;
use tokio_stream::wrappers::WatchStream;
use tokio_stream::StreamExt;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Current view snapshot
pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<ViewSnapshot> {
    Json(state.aggregator.snapshot())
}

/// Explicit refresh, optionally with new date parameters. An empty body
/// keeps the current parameters; a body that is not valid parameters is
/// rejected without fetching.
pub async fn refresh_dashboard(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let params = if body.trim_ascii().is_empty() {
        None
    } else {
        match Json::<DashboardParams>::from_bytes(&body) {
            Ok(Json(params)) => Some(params),
            Err(rejection) => {
                tracing::warn!(error = %rejection, "rejected refresh parameters");
                return rejection.into_response();
            }
        }
    };

    let result = state.aggregator.refresh(params).await;
    snapshot_response(&state, result.is_ok())
}

/// Replaces the date parameters; fetches only if they changed
pub async fn update_params(
    State(state): State<Arc<AppState>>,
    Json(params): Json<DashboardParams>,
) -> Response {
    let ok = match state.aggregator.set_params(params).await {
        Some(result) => result.is_ok(),
        None => true,
    };
    snapshot_response(&state, ok)
}

/// Derived headline numbers for the data currently on display
pub async fn dashboard_summary(State(state): State<Arc<AppState>>) -> Response {
    match state.aggregator.snapshot().data {
        Some(data) => Json(DashboardSummary::from_data(&data)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "no dashboard data loaded yet" })),
        )
            .into_response(),
    }
}

/// Pushes every committed snapshot to the client
pub async fn dashboard_events(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = WatchStream::new(state.aggregator.subscribe()).map(|snapshot| {
        let event = match Event::default().event(snapshot.state).json_data(&snapshot) {
            Ok(event) => event,
            Err(e) => {
                tracing::error!("Failed to encode dashboard event: {}", e);
                Event::default().event("error").data(e.to_string())
            }
        };
        Ok(event)
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

fn snapshot_response(state: &AppState, ok: bool) -> Response {
    let status = if ok {
        StatusCode::OK
    } else {
        StatusCode::BAD_GATEWAY
    };
    (status, Json(state.aggregator.snapshot())).into_response()
}
