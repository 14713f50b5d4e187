// Aggregation - fan out to the family endpoints, fan in to one DashboardData
use crate::application::metrics_source::{ClientError, FamilyResult, MetricsSource};
use crate::domain::dashboard::{AggregationMode, DashboardData, DashboardParams};
use crate::domain::metrics::{FamilyData, MetricFamily};
use std::future::Future;
use thiserror::Error;

/// The first family failure of an aggregation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to load {family} metrics: {source}")]
pub struct AggregationError {
    pub family: MetricFamily,
    #[source]
    pub source: ClientError,
}

/// Runs one aggregation. All family calls for the mode are issued together
/// and the result is either every requested family or an error; the first
/// failure wins and the calls still pending are dropped.
pub async fn aggregate(
    source: &dyn MetricsSource,
    mode: AggregationMode,
    params: &DashboardParams,
) -> Result<DashboardData, AggregationError> {
    let requests = params.requests();
    tracing::debug!(?mode, ?requests, "starting aggregation");

    let data = match mode {
        AggregationMode::Basic => {
            let (kpi, visit) = tokio::try_join!(
                tagged(MetricFamily::Kpi, source.kpi(&requests.kpi)),
                tagged(MetricFamily::Visit, source.visit(&requests.visit)),
            )?;

            DashboardData {
                kpi: Some(kpi),
                visit: Some(visit),
                ..DashboardData::default()
            }
        }
        AggregationMode::Extended => {
            let (kpi, visit, click, workshop, video) = tokio::try_join!(
                tagged(MetricFamily::Kpi, source.kpi(&requests.kpi)),
                tagged(MetricFamily::Visit, source.visit(&requests.visit)),
                tagged(MetricFamily::Click, source.click(&requests.click)),
                tagged(MetricFamily::Workshop, source.workshop(&requests.workshop)),
                tagged(MetricFamily::Video, source.video(requests.video.as_ref())),
            )?;

            DashboardData {
                kpi: Some(kpi),
                visit: Some(visit),
                workshop: Some(workshop),
                video: Some(video),
                click: Some(click),
            }
        }
    };

    Ok(data)
}

async fn tagged<T, F>(family: MetricFamily, call: F) -> Result<FamilyData<T>, AggregationError>
where
    F: Future<Output = FamilyResult<T>>,
{
    call.await.map_err(|source| {
        tracing::warn!(%family, error = %source, "metric family call failed");
        AggregationError { family, source }
    })
}
