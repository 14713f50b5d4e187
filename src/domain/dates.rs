// Date parameters accepted by the metric endpoints
use serde::{Deserialize, Serialize};

/// Inclusive reporting window, both bounds as `YYYY-MM-DD`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Builds a range only when both bounds are present
    pub fn from_bounds(start: Option<&str>, end: Option<&str>) -> Option<Self> {
        match (present(start), present(end)) {
            (Some(start), Some(end)) => Some(Self::new(start, end)),
            _ => None,
        }
    }

    /// `start_date` and `end_date` query parameters
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![("start_date", self.start.clone()), ("end_date", self.end.clone())]
    }
}

/// Which snapshot a family endpoint should report on.
///
/// Dates are passed through as given; calendar correctness is the
/// backend's concern.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DateFilter {
    /// No parameter, the server picks its default
    #[default]
    Latest,
    On(String),
    Between(DateRange),
}

impl DateFilter {
    pub fn on(date: Option<&str>) -> Self {
        match present(date) {
            Some(date) => DateFilter::On(date.to_string()),
            None => DateFilter::Latest,
        }
    }

    /// Single-date view of the filter. A range degrades to its start.
    pub fn single_date(&self) -> Option<&str> {
        match self {
            DateFilter::Latest => None,
            DateFilter::On(date) => Some(date.as_str()),
            DateFilter::Between(range) => Some(range.start.as_str()),
        }
    }

    /// Query parameters for endpoints that only know a single `date`
    pub fn single_date_params(&self) -> Vec<(&'static str, String)> {
        self.single_date()
            .map(|date| vec![("date", date.to_string())])
            .unwrap_or_default()
    }

    /// Query parameters for endpoints that accept either form
    pub fn range_params(&self) -> Vec<(&'static str, String)> {
        match self {
            DateFilter::Latest => Vec::new(),
            DateFilter::On(date) => vec![("date", date.clone())],
            DateFilter::Between(range) => range.query_params(),
        }
    }
}

/// Treats empty strings the same as a missing value
pub fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_needs_both_bounds() {
        assert_eq!(
            DateRange::from_bounds(Some("2025-06-15"), Some("2025-06-25")),
            Some(DateRange::new("2025-06-15", "2025-06-25"))
        );
        assert_eq!(DateRange::from_bounds(Some("2025-06-15"), None), None);
        assert_eq!(DateRange::from_bounds(Some("2025-06-15"), Some("")), None);
    }

    #[test]
    fn test_single_date_degrades_range_to_start() {
        let filter = DateFilter::Between(DateRange::new("2025-06-15", "2025-06-25"));
        assert_eq!(filter.single_date(), Some("2025-06-15"));
        assert_eq!(DateFilter::Latest.single_date(), None);
    }

    #[test]
    fn test_query_params_per_form() {
        let range = DateFilter::Between(DateRange::new("2025-06-15", "2025-06-25"));

        assert!(DateFilter::Latest.single_date_params().is_empty());
        assert_eq!(range.single_date_params(), vec![("date", "2025-06-15".to_string())]);
        assert_eq!(
            range.range_params(),
            vec![
                ("start_date", "2025-06-15".to_string()),
                ("end_date", "2025-06-25".to_string())
            ]
        );
        assert_eq!(
            DateFilter::On("2025-06-20".into()).range_params(),
            vec![("date", "2025-06-20".to_string())]
        );
    }

    #[test]
    fn test_blank_date_is_latest() {
        assert_eq!(DateFilter::on(Some("  ")), DateFilter::Latest);
        assert_eq!(DateFilter::on(Some("2025-06-20")), DateFilter::On("2025-06-20".into()));
    }
}
