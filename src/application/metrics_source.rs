// Source trait for metric family data
use crate::domain::dates::{DateFilter, DateRange};
use crate::domain::metrics::{
    ClickMetrics, FamilyData, KpiMetrics, MetricFamily, VideoMetrics, VisitMetrics,
    WorkshopMetrics,
};
use async_trait::async_trait;
use thiserror::Error;

/// Why a single family call failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Unreachable host, DNS failure, timeout or a broken body stream
    #[error("network error: {message}")]
    Network { message: String },

    #[error("HTTP error! status: {status}")]
    Http { status: u16 },

    /// The endpoint answered but reported `success: false`
    #[error("{family} API response indicates failure")]
    ApiLogical { family: MetricFamily },

    #[error("malformed {family} response: {message}")]
    MalformedResponse {
        family: MetricFamily,
        message: String,
    },
}

impl ClientError {
    pub fn network(err: impl std::fmt::Display) -> Self {
        ClientError::Network {
            message: err.to_string(),
        }
    }

    pub fn malformed(family: MetricFamily, err: impl std::fmt::Display) -> Self {
        ClientError::MalformedResponse {
            family,
            message: err.to_string(),
        }
    }
}

pub type FamilyResult<T> = Result<FamilyData<T>, ClientError>;

/// One call per family; each call is a single attempt.
#[async_trait]
pub trait MetricsSource: Send + Sync {
    async fn kpi(&self, filter: &DateFilter) -> FamilyResult<KpiMetrics>;

    async fn visit(&self, filter: &DateFilter) -> FamilyResult<VisitMetrics>;

    /// A range maps to `start_date`/`end_date`, a single date to `date`
    async fn workshop(&self, filter: &DateFilter) -> FamilyResult<WorkshopMetrics>;

    /// `None` lets the server choose its default window
    async fn video(&self, range: Option<&DateRange>) -> FamilyResult<VideoMetrics>;

    async fn click(&self, filter: &DateFilter) -> FamilyResult<ClickMetrics>;
}
