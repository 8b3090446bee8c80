pub mod config;
pub mod errors;
pub mod ingest;
pub mod metrics;
pub mod model;
pub mod on_error;
pub mod pipeline;
pub mod project;
pub mod render;
pub mod report;
pub mod stats;
