// View state machine: Idle -> Loading -> {Ready, Failed}
use super::dashboard::{DashboardData, DashboardParams};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    /// A fetch is in flight; whatever was on screen stays there
    Loading { last_good: Option<Arc<DashboardData>> },
    Ready(Arc<DashboardData>),
    Failed {
        last_good: Option<Arc<DashboardData>>,
        error: String,
    },
}

impl ViewState {
    /// Data to display in this state
    pub fn data(&self) -> Option<&Arc<DashboardData>> {
        match self {
            ViewState::Idle => None,
            ViewState::Loading { last_good } | ViewState::Failed { last_good, .. } => {
                last_good.as_ref()
            }
            ViewState::Ready(data) => Some(data),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Failed { error, .. } => Some(error.as_str()),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Idle => "idle",
            ViewState::Loading { .. } => "loading",
            ViewState::Ready(_) => "ready",
            ViewState::Failed { .. } => "failed",
        }
    }

    /// Entered on every trigger
    pub fn begin_loading(&self) -> ViewState {
        ViewState::Loading {
            last_good: self.data().cloned(),
        }
    }

    pub fn succeed(data: Arc<DashboardData>) -> ViewState {
        ViewState::Ready(data)
    }

    /// Keeps the last successful aggregate next to the new error
    pub fn fail(&self, error: impl Into<String>) -> ViewState {
        ViewState::Failed {
            last_good: self.data().cloned(),
            error: error.into(),
        }
    }
}

/// What a consumer sees: data (if any), a loading flag and an error message
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ViewSnapshot {
    #[serde(skip)]
    pub view: ViewState,
    pub state: &'static str,
    pub data: Option<Arc<DashboardData>>,
    pub loading: bool,
    pub error: Option<String>,
    /// Parameters of the most recent trigger
    pub params: DashboardParams,
    /// Number of triggers so far
    pub generation: u64,
}

impl ViewSnapshot {
    pub fn new(view: ViewState, params: DashboardParams, generation: u64) -> Self {
        Self {
            state: view.name(),
            data: view.data().cloned(),
            loading: view.is_loading(),
            error: view.error().map(str::to_string),
            view,
            params,
            generation,
        }
    }
}
