// Application layer - aggregation use cases over a metrics source
pub mod aggregation;
pub mod metrics_source;
pub mod view_aggregator;

#[cfg(test)]
pub(crate) mod fake_source;
