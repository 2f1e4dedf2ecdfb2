//! Telemetry sinks: `tracing` for logs and CloudWatch EMF for metrics.

mod logger;
mod metrics;
#[cfg(test)]
pub mod recording;

pub use logger::{init_tracing, TracingLogger};
pub use metrics::EmfMetricsRecorder;
