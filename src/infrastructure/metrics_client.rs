// HTTP metrics client - one GET per family call
use crate::application::metrics_source::{ClientError, FamilyResult, MetricsSource};
use crate::domain::dates::{DateFilter, DateRange};
use crate::domain::metrics::{
    ClickMetrics, KpiMetrics, MetricEnvelope, MetricFamily, VideoMetrics, VisitMetrics,
    WorkshopMetrics,
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct HttpMetricsClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpMetricsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Endpoint URL for a family, with a query string only when there are parameters
    pub fn build_url(&self, family: MetricFamily, params: &[(&str, String)]) -> String {
        let mut url = format!("{}{}", self.base_url, family.path());
        if !params.is_empty() {
            let query: Vec<String> = params
                .iter()
                .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
                .collect();
            url.push('?');
            url.push_str(&query.join("&"));
        }
        url
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        family: MetricFamily,
        params: Vec<(&'static str, String)>,
    ) -> FamilyResult<T> {
        let url = self.build_url(family, &params);
        tracing::debug!(%family, %url, "requesting metrics");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(ClientError::network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(ClientError::network)?;
        parse_envelope(family, &body)
    }
}

/// Validates an envelope body. The success flag is checked before the
/// payload, so a failed response never yields metrics even when they parse.
pub fn parse_envelope<T: DeserializeOwned>(family: MetricFamily, body: &[u8]) -> FamilyResult<T> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| ClientError::malformed(family, e))?;

    // Early backends used `ok` instead of `success`
    let success = value
        .get("success")
        .or_else(|| value.get("ok"))
        .and_then(Value::as_bool);
    match success {
        Some(true) => {}
        Some(false) => return Err(ClientError::ApiLogical { family }),
        None => return Err(ClientError::malformed(family, "missing success flag")),
    }

    let envelope: MetricEnvelope<T> =
        serde_json::from_value(value).map_err(|e| ClientError::malformed(family, e))?;
    Ok(envelope.into())
}

#[async_trait]
impl MetricsSource for HttpMetricsClient {
    async fn kpi(&self, filter: &DateFilter) -> FamilyResult<KpiMetrics> {
        self.fetch(MetricFamily::Kpi, filter.single_date_params()).await
    }

    async fn visit(&self, filter: &DateFilter) -> FamilyResult<VisitMetrics> {
        self.fetch(MetricFamily::Visit, filter.single_date_params()).await
    }

    async fn workshop(&self, filter: &DateFilter) -> FamilyResult<WorkshopMetrics> {
        self.fetch(MetricFamily::Workshop, filter.range_params()).await
    }

    async fn video(&self, range: Option<&DateRange>) -> FamilyResult<VideoMetrics> {
        let params = range.map(DateRange::query_params).unwrap_or_default();
        self.fetch(MetricFamily::Video, params).await
    }

    async fn click(&self, filter: &DateFilter) -> FamilyResult<ClickMetrics> {
        self.fetch(MetricFamily::Click, filter.single_date_params()).await
    }
}
