// Derived figures shown on the dashboard screens
use super::dashboard::DashboardData;
use super::metrics::{ClickMetrics, DatedRecord, VideoMetrics};
use chrono::NaiveDate;
use serde::Serialize;

/// `part` as a percentage of `whole`, zero when there is nothing to divide by
pub fn ratio_percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

impl VideoMetrics {
    /// Share of sent videos that got a response
    pub fn response_rate(&self) -> f64 {
        ratio_percent(self.total_video_responses_received, self.total_videos_sent)
    }

    /// Share of responses that were validated
    pub fn validation_rate(&self) -> f64 {
        ratio_percent(self.total_validations_sent, self.total_video_responses_received)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClickCount {
    pub target: String,
    pub count: u64,
}

impl ClickMetrics {
    /// Sum of all counters, saturating at `u64::MAX`
    pub fn total_clicks(&self) -> u64 {
        self.clicks
            .values()
            .fold(0u64, |total, count| total.saturating_add(*count))
    }

    /// Most clicked targets, highest first. Ties keep alphabetical order.
    pub fn top(&self, n: usize) -> Vec<ClickCount> {
        let mut counts: Vec<ClickCount> = self
            .clicks
            .iter()
            .map(|(target, count)| ClickCount {
                target: target.clone(),
                count: *count,
            })
            .collect();
        // BTreeMap iteration is already sorted by name, so a stable sort keeps ties ordered
        counts.sort_by(|a, b| b.count.cmp(&a.count));
        counts.truncate(n);
        counts
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub label: String,
    pub metric_date: String,
    pub value: f64,
}

/// Short chart label (`Jun 20`) for an ISO date, the raw string otherwise
pub fn date_label(metric_date: &str) -> String {
    match NaiveDate::parse_from_str(metric_date, "%Y-%m-%d") {
        Ok(date) => date.format("%b %-d").to_string(),
        Err(_) => metric_date.to_string(),
    }
}

/// Turns a newest-first history into an oldest-first chart series
pub fn trend<T, F>(history: &[T], value: F) -> Vec<TrendPoint>
where
    T: DatedRecord,
    F: Fn(&T) -> f64,
{
    history
        .iter()
        .rev()
        .map(|item| TrendPoint {
            label: date_label(item.metric_date()),
            metric_date: item.metric_date().to_string(),
            value: value(item),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiSummary {
    pub metric_date: String,
    pub total_registered_users: u64,
    pub active_users_30d: u64,
    pub active_share: f64,
    pub dau: u64,
    pub new_users: u64,
    pub ai_response_rate: f64,
    pub dau_trend: Vec<TrendPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisitSummary {
    pub metric_date: String,
    pub total_visits: u64,
    pub unique_visitors: u64,
    pub visits_trend: Vec<TrendPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkshopSummary {
    pub metric_date: String,
    pub nb_workshop: u64,
    pub unique_workshop_attendees: u64,
    pub total_workshop_attendees: u64,
    pub attendees_trend: Vec<TrendPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoSummary {
    pub metric_date: String,
    pub total_videos_sent: u64,
    pub response_rate: f64,
    pub validation_rate: f64,
    pub response_rate_trend: Vec<TrendPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClickSummary {
    pub metric_date: String,
    pub total_clicks: u64,
    pub top: Vec<ClickCount>,
}

/// Headline numbers per family present in an aggregate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub kpi: Option<KpiSummary>,
    pub visit: Option<VisitSummary>,
    pub workshop: Option<WorkshopSummary>,
    pub video: Option<VideoSummary>,
    pub clicks: Option<ClickSummary>,
}

impl DashboardSummary {
    pub const TOP_CLICKS: usize = 5;

    pub fn from_data(data: &DashboardData) -> Self {
        let kpi = data.kpi.as_ref().map(|family| {
            let m = &family.metrics;
            KpiSummary {
                metric_date: m.metric_date.clone(),
                total_registered_users: m.total_registered_users,
                active_users_30d: m.active_users_30d,
                active_share: ratio_percent(m.active_users_30d, m.total_registered_users),
                dau: m.dau,
                new_users: m.new_users,
                ai_response_rate: m.ai_response_rate,
                dau_trend: trend(&family.history, |h| h.dau as f64),
            }
        });

        let visit = data.visit.as_ref().map(|family| VisitSummary {
            metric_date: family.metrics.metric_date.clone(),
            total_visits: family.metrics.total_visits,
            unique_visitors: family.metrics.unique_visitors,
            visits_trend: trend(&family.history, |h| h.total_visits as f64),
        });

        let workshop = data.workshop.as_ref().map(|family| {
            let m = &family.metrics;
            WorkshopSummary {
                metric_date: m.metric_date.clone(),
                nb_workshop: m.nb_workshop,
                unique_workshop_attendees: m.unique_workshop_attendees,
                total_workshop_attendees: m.total_workshop_attendees,
                attendees_trend: trend(&family.history, |h| h.total_workshop_attendees as f64),
            }
        });

        let video = data.video.as_ref().map(|family| {
            let m = &family.metrics;
            VideoSummary {
                metric_date: m.metric_date.clone(),
                total_videos_sent: m.total_videos_sent,
                response_rate: m.response_rate(),
                validation_rate: m.validation_rate(),
                response_rate_trend: trend(&family.history, VideoMetrics::response_rate),
            }
        });

        let clicks = data.click.as_ref().map(|family| ClickSummary {
            metric_date: family.metrics.metric_date.clone(),
            total_clicks: family.metrics.total_clicks(),
            top: family.metrics.top(Self::TOP_CLICKS),
        });

        Self {
            kpi,
            visit,
            workshop,
            video,
            clicks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metrics::{FamilyData, VisitMetrics};
    use std::collections::BTreeMap;

    fn video(date: &str, sent: u64, received: u64, validated: u64) -> VideoMetrics {
        VideoMetrics {
            total_videos_sent: sent,
            total_video_responses_received: received,
            total_validations_sent: validated,
            total_invalidations_sent: 0,
            metric_date: date.to_string(),
        }
    }

    #[test]
    fn test_ratio_percent_handles_zero() {
        assert_eq!(ratio_percent(5, 0), 0.0);
        assert_eq!(ratio_percent(1, 4), 25.0);
    }

    #[test]
    fn test_video_rates() {
        let m = video("2025-06-20", 200, 50, 40);
        assert_eq!(m.response_rate(), 25.0);
        assert_eq!(m.validation_rate(), 80.0);
    }

    #[test]
    fn test_top_clicks_orders_by_count_then_name() {
        let mut clicks = BTreeMap::new();
        clicks.insert("quiz".to_string(), 10);
        clicks.insert("aide".to_string(), 10);
        clicks.insert("menu".to_string(), 42);
        clicks.insert("video".to_string(), 3);
        let metrics = ClickMetrics {
            clicks,
            metric_date: "2025-06-20".into(),
        };

        let top = metrics.top(3);
        let names: Vec<&str> = top.iter().map(|c| c.target.as_str()).collect();
        assert_eq!(names, vec!["menu", "aide", "quiz"]);
        assert_eq!(metrics.total_clicks(), 65);
    }

    #[test]
    fn test_total_clicks_saturates() {
        let metrics = ClickMetrics {
            clicks: BTreeMap::from([("a".to_string(), u64::MAX), ("b".to_string(), 1)]),
            metric_date: "2025-06-20".into(),
        };

        assert_eq!(metrics.total_clicks(), u64::MAX);
    }

    #[test]
    fn test_visit_summary() {
        let visit = |date: &str, total: u64| VisitMetrics {
            total_visits: total,
            unique_visitors: total / 2,
            metric_date: date.to_string(),
            extra: BTreeMap::new(),
        };
        let data = DashboardData {
            visit: Some(FamilyData::new(
                visit("2025-06-20", 880),
                vec![visit("2025-06-19", 700), visit("2025-06-18", 650)],
            )),
            ..DashboardData::default()
        };

        let summary = DashboardSummary::from_data(&data).visit.unwrap();
        assert_eq!(summary.total_visits, 880);
        assert_eq!(summary.unique_visitors, 440);
        let values: Vec<f64> = summary.visits_trend.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![650.0, 700.0]);
        assert_eq!(summary.visits_trend[0].label, "Jun 18");
    }

    #[test]
    fn test_trend_is_oldest_first() {
        let history = vec![
            video("2025-06-20", 10, 5, 0),
            video("2025-06-19", 10, 2, 0),
        ];

        let points = trend(&history, VideoMetrics::response_rate);
        assert_eq!(points[0].label, "Jun 19");
        assert_eq!(points[0].value, 20.0);
        assert_eq!(points[1].metric_date, "2025-06-20");
    }

    #[test]
    fn test_date_label_keeps_unparseable_dates() {
        assert_eq!(date_label("2025-06-05"), "Jun 5");
        assert_eq!(date_label("week 23"), "week 23");
    }

    #[test]
    fn test_summary_only_covers_present_families() {
        let data = DashboardData {
            video: Some(FamilyData::new(video("2025-06-20", 4, 2, 1), vec![])),
            ..DashboardData::default()
        };

        let summary = DashboardSummary::from_data(&data);
        assert!(summary.kpi.is_none());
        assert!(summary.visit.is_none());
        assert!(summary.clicks.is_none());
        let video = summary.video.unwrap();
        assert_eq!(video.response_rate, 50.0);
        assert_eq!(video.validation_rate, 50.0);
    }
}
