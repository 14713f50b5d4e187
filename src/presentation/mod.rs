// Presentation layer - HTTP surface over the view aggregator
pub mod app_state;
pub mod handlers;
pub mod router;
