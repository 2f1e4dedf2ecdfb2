use std::time::Duration;

use crate::product::{Operation, RequestContext};

/// Structured fields of a single log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub message: String,
    pub product_id: String,
}

impl LogEntry {
    pub fn new(message: impl Into<String>, product_id: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            product_id: product_id.into(),
        }
    }
}

/// Fire-and-forget structured logging.
pub trait Logger: Send + Sync {
    fn log(&self, context: &RequestContext, source: &str, entry: &LogEntry);
}

/// Fire-and-forget timing metrics.
pub trait MetricsRecorder: Send + Sync {
    fn record_metric_event(
        &self,
        context: &RequestContext,
        source: &str,
        operation: Operation,
        duration: Duration,
    );
}
