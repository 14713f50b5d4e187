// In-memory MetricsSource for exercising aggregation without HTTP
use crate::application::metrics_source::{ClientError, FamilyResult, MetricsSource};
use crate::domain::dates::{DateFilter, DateRange};
use crate::domain::metrics::{
    ClickMetrics, FamilyData, KpiMetrics, MetricFamily, VideoMetrics, VisitMetrics,
    WorkshopMetrics,
};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

const DEFAULT_DATE: &str = "2025-06-20";

#[derive(Default)]
pub struct FakeSource {
    failures: Mutex<HashMap<MetricFamily, ClientError>>,
    delays: Mutex<HashMap<MetricFamily, VecDeque<Duration>>>,
    calls: Mutex<Vec<(MetricFamily, String)>>,
}

impl FakeSource {
    pub fn healthy() -> Self {
        Self::default()
    }

    pub fn failing(self, family: MetricFamily, error: ClientError) -> Self {
        self.set_failure(family, Some(error));
        self
    }

    /// Delays applied to successive calls of one family, in order
    pub fn delayed(self, family: MetricFamily, delays: Vec<Duration>) -> Self {
        self.delays.lock().unwrap().insert(family, delays.into());
        self
    }

    pub fn set_failure(&self, family: MetricFamily, error: Option<ClientError>) {
        let mut failures = self.failures.lock().unwrap();
        match error {
            Some(error) => failures.insert(family, error),
            None => failures.remove(&family),
        };
    }

    pub fn calls(&self) -> Vec<(MetricFamily, String)> {
        self.calls.lock().unwrap().clone()
    }

    /// Query string of the most recent call for a family
    pub fn filter_for(&self, family: MetricFamily) -> Option<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(f, _)| *f == family)
            .map(|(_, query)| query.clone())
    }

    async fn respond<T>(
        &self,
        family: MetricFamily,
        params: Vec<(&'static str, String)>,
        build: impl Fn(&str) -> T,
    ) -> FamilyResult<T> {
        let query = params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        self.calls.lock().unwrap().push((family, query));

        let delay = self
            .delays
            .lock()
            .unwrap()
            .get_mut(&family)
            .and_then(VecDeque::pop_front);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let failure = self.failures.lock().unwrap().get(&family).cloned();
        if let Some(error) = failure {
            return Err(error);
        }

        // The snapshot echoes the first requested date so tests can tell calls apart
        let date = params
            .first()
            .map(|(_, v)| v.as_str())
            .unwrap_or(DEFAULT_DATE);
        Ok(FamilyData::new(
            build(date),
            vec![build("2025-06-19"), build("2025-06-18")],
        ))
    }
}

pub fn kpi(date: &str) -> KpiMetrics {
    KpiMetrics {
        total_registered_users: 5243,
        active_users_30d: 4128,
        dau: 512,
        new_users: 37,
        total_wh_messages: 12000,
        ai_response_rate: 0.93,
        metric_date: date.to_string(),
    }
}

pub fn visit(date: &str) -> VisitMetrics {
    VisitMetrics {
        total_visits: 880,
        unique_visitors: 410,
        metric_date: date.to_string(),
        extra: BTreeMap::new(),
    }
}

pub fn workshop(date: &str) -> WorkshopMetrics {
    WorkshopMetrics {
        unique_workshop_attendees: 64,
        total_workshop_attendees: 90,
        nb_workshop: 3,
        metric_date: date.to_string(),
    }
}

pub fn video(date: &str) -> VideoMetrics {
    VideoMetrics {
        total_videos_sent: 300,
        total_video_responses_received: 120,
        total_validations_sent: 96,
        total_invalidations_sent: 24,
        metric_date: date.to_string(),
    }
}

pub fn click(date: &str) -> ClickMetrics {
    ClickMetrics {
        clicks: BTreeMap::from([("menu".to_string(), 42), ("quiz".to_string(), 17)]),
        metric_date: date.to_string(),
    }
}

#[async_trait]
impl MetricsSource for FakeSource {
    async fn kpi(&self, filter: &DateFilter) -> FamilyResult<KpiMetrics> {
        self.respond(MetricFamily::Kpi, filter.single_date_params(), kpi)
            .await
    }

    async fn visit(&self, filter: &DateFilter) -> FamilyResult<VisitMetrics> {
        self.respond(MetricFamily::Visit, filter.single_date_params(), visit)
            .await
    }

    async fn workshop(&self, filter: &DateFilter) -> FamilyResult<WorkshopMetrics> {
        self.respond(MetricFamily::Workshop, filter.range_params(), workshop)
            .await
    }

    async fn video(&self, range: Option<&DateRange>) -> FamilyResult<VideoMetrics> {
        let params = range.map(DateRange::query_params).unwrap_or_default();
        self.respond(MetricFamily::Video, params, video).await
    }

    async fn click(&self, filter: &DateFilter) -> FamilyResult<ClickMetrics> {
        self.respond(MetricFamily::Click, filter.single_date_params(), click)
            .await
    }
}
