// View aggregator - owns the current DashboardData and its loading/error state
use crate::application::aggregation::{aggregate, AggregationError};
use crate::application::metrics_source::MetricsSource;
use crate::domain::dashboard::{AggregationMode, DashboardData, DashboardParams};
use crate::domain::view_state::{ViewSnapshot, ViewState};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub type RefreshResult = Result<Arc<DashboardData>, AggregationError>;

/// What to do with a result whose trigger has since been superseded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitPolicy {
    /// Only the most recently triggered aggregation may update the view
    #[default]
    LatestTrigger,
    /// Whichever aggregation settles last wins, even if it was triggered first
    LastSettled,
}

/// State container for one dashboard view.
///
/// Every trigger moves the view to `Loading`, runs one aggregation and then
/// commits `Ready` or `Failed`. Consumers read the current snapshot or
/// subscribe to changes; nothing is re-rendered implicitly.
#[derive(Clone)]
pub struct ViewAggregator {
    source: Arc<dyn MetricsSource>,
    mode: AggregationMode,
    policy: CommitPolicy,
    state: Arc<watch::Sender<ViewSnapshot>>,
}

impl ViewAggregator {
    pub fn new(
        source: Arc<dyn MetricsSource>,
        mode: AggregationMode,
        policy: CommitPolicy,
    ) -> Self {
        Self::with_params(source, mode, policy, DashboardParams::default())
    }

    pub fn with_params(
        source: Arc<dyn MetricsSource>,
        mode: AggregationMode,
        policy: CommitPolicy,
        params: DashboardParams,
    ) -> Self {
        let (state, _) = watch::channel(ViewSnapshot::new(ViewState::Idle, params, 0));
        Self {
            source,
            mode,
            policy,
            state: Arc::new(state),
        }
    }

    pub fn mode(&self) -> AggregationMode {
        self.mode
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        self.state.borrow().clone()
    }

    pub fn params(&self) -> DashboardParams {
        self.state.borrow().params.clone()
    }

    /// Receives every committed state change
    pub fn subscribe(&self) -> watch::Receiver<ViewSnapshot> {
        self.state.subscribe()
    }

    /// Explicit refresh. Always fetches, with new parameters if given, and
    /// hands this trigger's own result back to the caller.
    pub async fn refresh(&self, params: Option<DashboardParams>) -> RefreshResult {
        let (generation, params) = self.begin(params);

        let result = aggregate(self.source.as_ref(), self.mode, &params)
            .await
            .map(Arc::new);

        self.commit(generation, &result);
        result
    }

    /// Dependency-driven refresh: fetches only when a date input changed,
    /// or when nothing has been fetched yet.
    pub async fn set_params(&self, params: DashboardParams) -> Option<RefreshResult> {
        let current = self.snapshot();
        if current.generation > 0 && current.params == params {
            tracing::debug!("dashboard parameters unchanged, skipping fetch");
            return None;
        }
        Some(self.refresh(Some(params)).await)
    }

    /// Runs a refresh in the background
    pub fn spawn_refresh(&self, params: Option<DashboardParams>) -> JoinHandle<RefreshResult> {
        let aggregator = self.clone();
        tokio::spawn(async move { aggregator.refresh(params).await })
    }

    fn begin(&self, params: Option<DashboardParams>) -> (u64, DashboardParams) {
        let mut started = (0, DashboardParams::default());
        self.state.send_modify(|snapshot| {
            let generation = snapshot.generation + 1;
            let params = params.unwrap_or_else(|| snapshot.params.clone());
            let view = snapshot.view.begin_loading();
            *snapshot = ViewSnapshot::new(view, params.clone(), generation);
            started = (generation, params);
        });

        tracing::info!(generation = started.0, mode = ?self.mode, "dashboard loading");
        started
    }

    /// Returns whether the result reached the view
    fn commit(&self, generation: u64, result: &RefreshResult) -> bool {
        let policy = self.policy;
        self.state.send_if_modified(|snapshot| {
            if policy == CommitPolicy::LatestTrigger && generation != snapshot.generation {
                tracing::debug!(
                    generation,
                    latest = snapshot.generation,
                    "discarding result of superseded aggregation"
                );
                return false;
            }

            let view = match result {
                Ok(data) => {
                    tracing::info!(generation, families = ?data.families(), "dashboard ready");
                    ViewState::succeed(data.clone())
                }
                Err(err) => {
                    tracing::warn!(generation, error = %err, "dashboard aggregation failed");
                    snapshot.view.fail(err.to_string())
                }
            };
            *snapshot = ViewSnapshot::new(view, snapshot.params.clone(), snapshot.generation);
            true
        })
    }
}
