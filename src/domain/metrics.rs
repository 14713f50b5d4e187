// Metric domain models - one record type per metric family
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One metric domain served by its own endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricFamily {
    Kpi,
    Visit,
    Workshop,
    Video,
    Click,
}

impl MetricFamily {
    pub const ALL: [MetricFamily; 5] = [
        MetricFamily::Kpi,
        MetricFamily::Visit,
        MetricFamily::Workshop,
        MetricFamily::Video,
        MetricFamily::Click,
    ];

    /// Endpoint path relative to the API base URL
    pub fn path(&self) -> &'static str {
        match self {
            MetricFamily::Kpi => "/api/kpi/",
            MetricFamily::Visit => "/api/visit/",
            MetricFamily::Workshop => "/api/workshop",
            MetricFamily::Video => "/api/video",
            MetricFamily::Click => "/api/click",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricFamily::Kpi => "kpi",
            MetricFamily::Visit => "visit",
            MetricFamily::Workshop => "workshop",
            MetricFamily::Video => "video",
            MetricFamily::Click => "click",
        }
    }
}

impl fmt::Display for MetricFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Implemented by every record that carries its snapshot date
pub trait DatedRecord {
    fn metric_date(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiMetrics {
    #[serde(default)]
    pub total_registered_users: u64,
    #[serde(default)]
    pub active_users_30d: u64,
    #[serde(default)]
    pub dau: u64,
    #[serde(default)]
    pub new_users: u64,
    #[serde(default)]
    pub total_wh_messages: u64,
    // Older backends name this avg_ai_response_rate
    #[serde(default, alias = "avg_ai_response_rate")]
    pub ai_response_rate: f64,
    pub metric_date: String,
}

/// Visit counters. The backend has shipped several shapes, so anything
/// beyond the common counters is kept verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitMetrics {
    #[serde(default)]
    pub total_visits: u64,
    #[serde(default)]
    pub unique_visitors: u64,
    pub metric_date: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkshopMetrics {
    #[serde(default)]
    pub unique_workshop_attendees: u64,
    #[serde(default)]
    pub total_workshop_attendees: u64,
    #[serde(default)]
    pub nb_workshop: u64,
    pub metric_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMetrics {
    #[serde(default)]
    pub total_videos_sent: u64,
    #[serde(default)]
    pub total_video_responses_received: u64,
    #[serde(default)]
    pub total_validations_sent: u64,
    #[serde(default)]
    pub total_invalidations_sent: u64,
    pub metric_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClickMetrics {
    #[serde(default)]
    pub clicks: BTreeMap<String, u64>,
    pub metric_date: String,
}

pub type KpiHistoryItem = KpiMetrics;
pub type VisitHistoryItem = VisitMetrics;
pub type WorkshopHistoryItem = WorkshopMetrics;
pub type VideoHistoryItem = VideoMetrics;
pub type ClickHistoryItem = ClickMetrics;

macro_rules! impl_dated {
    ($($ty:ty),*) => {
        $(impl DatedRecord for $ty {
            fn metric_date(&self) -> &str {
                &self.metric_date
            }
        })*
    };
}

impl_dated!(KpiMetrics, VisitMetrics, WorkshopMetrics, VideoMetrics, ClickMetrics);

/// Wire shape returned by every metric endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct MetricEnvelope<T> {
    #[serde(alias = "ok")]
    pub success: bool,
    pub metrics: T,
    pub history: Vec<T>,
}

/// Validated result of one endpoint call: the current snapshot and the
/// newest-first history that came with it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FamilyData<T> {
    pub metrics: T,
    pub history: Vec<T>,
}

impl<T> FamilyData<T> {
    pub fn new(metrics: T, history: Vec<T>) -> Self {
        Self { metrics, history }
    }
}

impl<T> From<MetricEnvelope<T>> for FamilyData<T> {
    fn from(envelope: MetricEnvelope<T>) -> Self {
        Self::new(envelope.metrics, envelope.history)
    }
}
