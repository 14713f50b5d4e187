use crate::application::view_aggregator::CommitPolicy;
use crate::domain::dashboard::{AggregationMode, DashboardParams};
use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub api: ApiSettings,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub view: ViewSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    /// Host serving the `/api/...` metric endpoints
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ViewSettings {
    #[serde(default)]
    pub mode: AggregationMode,
    #[serde(default)]
    pub commit_policy: CommitPolicy,
    /// Reporting date used for the first fetch; the server default when unset
    pub initial_date: Option<String>,
    pub video_start: Option<String>,
    pub video_end: Option<String>,
    pub workshop_start: Option<String>,
    pub workshop_end: Option<String>,
}

impl ViewSettings {
    pub fn initial_params(&self) -> DashboardParams {
        DashboardParams {
            date: self.initial_date.clone(),
            workshop_start: self.workshop_start.clone(),
            workshop_end: self.workshop_end.clone(),
            video_start: self.video_start.clone(),
            video_end: self.video_end.clone(),
        }
    }
}

/// Loads `config/dashboard.*` (optional), then `DASHBOARD__SECTION__KEY`
/// environment overrides.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    load_app_config_from("config/dashboard")
}

pub fn load_app_config_from(file: &str) -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .set_default("api.base_url", "http://127.0.0.1:8000")?
        .add_source(config::File::with_name(file).required(false))
        .add_source(config::Environment::with_prefix("DASHBOARD").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
