// Application state for HTTP handlers
use crate::application::view_aggregator::ViewAggregator;

#[derive(Clone)]
pub struct AppState {
    pub aggregator: ViewAggregator,
}
