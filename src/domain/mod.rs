// Domain layer - metric records and the dashboard view model
pub mod dashboard;
pub mod dates;
pub mod insights;
pub mod metrics;
pub mod view_state;
