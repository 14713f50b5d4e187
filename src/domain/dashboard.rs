// Dashboard domain model - the aggregated view model
use super::dates::{present, DateFilter, DateRange};
use super::metrics::{
    ClickMetrics, FamilyData, KpiMetrics, MetricFamily, VideoMetrics, VisitMetrics,
    WorkshopMetrics,
};
use serde::{Deserialize, Serialize};

/// Aggregated view model. A `None` slot means the family was not requested
/// by the view, not that it came back empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DashboardData {
    pub kpi: Option<FamilyData<KpiMetrics>>,
    pub visit: Option<FamilyData<VisitMetrics>>,
    pub workshop: Option<FamilyData<WorkshopMetrics>>,
    pub video: Option<FamilyData<VideoMetrics>>,
    pub click: Option<FamilyData<ClickMetrics>>,
}

impl DashboardData {
    pub fn kpi(&self) -> Option<&KpiMetrics> {
        self.kpi.as_ref().map(|f| &f.metrics)
    }

    pub fn kpi_history(&self) -> Option<&[KpiMetrics]> {
        self.kpi.as_ref().map(|f| f.history.as_slice())
    }

    pub fn visit(&self) -> Option<&VisitMetrics> {
        self.visit.as_ref().map(|f| &f.metrics)
    }

    pub fn visit_history(&self) -> Option<&[VisitMetrics]> {
        self.visit.as_ref().map(|f| f.history.as_slice())
    }

    pub fn workshop(&self) -> Option<&WorkshopMetrics> {
        self.workshop.as_ref().map(|f| &f.metrics)
    }

    pub fn workshop_history(&self) -> Option<&[WorkshopMetrics]> {
        self.workshop.as_ref().map(|f| f.history.as_slice())
    }

    pub fn video(&self) -> Option<&VideoMetrics> {
        self.video.as_ref().map(|f| &f.metrics)
    }

    pub fn video_history(&self) -> Option<&[VideoMetrics]> {
        self.video.as_ref().map(|f| f.history.as_slice())
    }

    pub fn click(&self) -> Option<&ClickMetrics> {
        self.click.as_ref().map(|f| &f.metrics)
    }

    pub fn click_history(&self) -> Option<&[ClickMetrics]> {
        self.click.as_ref().map(|f| f.history.as_slice())
    }

    /// Families populated in this aggregate
    pub fn families(&self) -> Vec<MetricFamily> {
        let mut families = Vec::new();
        if self.kpi.is_some() {
            families.push(MetricFamily::Kpi);
        }
        if self.visit.is_some() {
            families.push(MetricFamily::Visit);
        }
        if self.workshop.is_some() {
            families.push(MetricFamily::Workshop);
        }
        if self.video.is_some() {
            families.push(MetricFamily::Video);
        }
        if self.click.is_some() {
            families.push(MetricFamily::Click);
        }
        families
    }
}

/// Which families a view fetches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationMode {
    /// KPI and visit, keyed by the reporting date
    Basic,
    /// All five families
    #[default]
    Extended,
}

impl AggregationMode {
    pub fn families(&self) -> &'static [MetricFamily] {
        match self {
            AggregationMode::Basic => &[MetricFamily::Kpi, MetricFamily::Visit],
            AggregationMode::Extended => &MetricFamily::ALL,
        }
    }
}

/// Date inputs of one aggregation. Every field is independent of the others.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardParams {
    pub date: Option<String>,
    pub workshop_start: Option<String>,
    pub workshop_end: Option<String>,
    pub video_start: Option<String>,
    pub video_end: Option<String>,
}

impl DashboardParams {
    pub fn on(date: impl Into<String>) -> Self {
        Self {
            date: Some(date.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_workshop_range(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.workshop_start = Some(start.into());
        self.workshop_end = Some(end.into());
        self
    }

    #[must_use]
    pub fn with_video_range(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.video_start = Some(start.into());
        self.video_end = Some(end.into());
        self
    }

    /// Resolves the per-family request filters
    pub fn requests(&self) -> FamilyRequests {
        let date = DateFilter::on(self.date.as_deref());

        let workshop_start = self.workshop_start.as_deref();
        let workshop = match DateRange::from_bounds(workshop_start, self.workshop_end.as_deref()) {
            Some(range) => DateFilter::Between(range),
            None => match present(workshop_start) {
                Some(start) => DateFilter::On(start.to_string()),
                None => date.clone(),
            },
        };

        let video = DateRange::from_bounds(self.video_start.as_deref(), self.video_end.as_deref());

        FamilyRequests {
            kpi: date.clone(),
            visit: date,
            workshop,
            video,
            click: DateFilter::Latest,
        }
    }
}

/// Filters sent to each family endpoint for one aggregation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyRequests {
    pub kpi: DateFilter,
    pub visit: DateFilter,
    pub workshop: DateFilter,
    /// No single-date form: absent means the server's default window
    pub video: Option<DateRange>,
    pub click: DateFilter,
}
