//! Telemetry doubles that record every call.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use product_manager_core::product::{Operation, RequestContext};
use product_manager_core::telemetry::{LogEntry, Logger, MetricsRecorder};

/// A recorded metric event.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricEvent {
    pub resource_id: String,
    pub source: String,
    pub operation: Operation,
    pub duration: Duration,
}

/// Records log entries and metric events in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingTelemetry {
    logs: Arc<Mutex<Vec<(String, LogEntry)>>>,
    metrics: Arc<Mutex<Vec<MetricEvent>>>,
}

impl RecordingTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn logs(&self) -> Vec<(String, LogEntry)> {
        self.logs.lock().unwrap().clone()
    }

    pub fn metrics(&self) -> Vec<MetricEvent> {
        self.metrics.lock().unwrap().clone()
    }
}

impl Logger for RecordingTelemetry {
    fn log(&self, _context: &RequestContext, source: &str, entry: &LogEntry) {
        self.logs
            .lock()
            .unwrap()
            .push((source.to_string(), entry.clone()));
    }
}

impl MetricsRecorder for RecordingTelemetry {
    fn record_metric_event(
        &self,
        context: &RequestContext,
        source: &str,
        operation: Operation,
        duration: Duration,
    ) {
        self.metrics.lock().unwrap().push(MetricEvent {
            resource_id: context.resource_id.clone(),
            source: source.to_string(),
            operation,
            duration,
        });
    }
}
