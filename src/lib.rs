// Learning-program dashboard data service: metrics client, view aggregation and HTTP surface
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
