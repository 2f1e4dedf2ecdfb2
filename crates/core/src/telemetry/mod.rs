//! Telemetry capabilities injected into the gateway.

mod traits;

pub use traits::{LogEntry, Logger, MetricsRecorder};
