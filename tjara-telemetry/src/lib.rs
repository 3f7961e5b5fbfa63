//! # tjara-telemetry
//!
//! Metric registry and logging for the tarpit exporter.

pub mod logging;
pub mod metrics;

pub use logging::EventLogger;
pub use metrics::TarpitMetrics;
