use std::time::Duration;

use product_manager_core::product::{Operation, RequestContext};
use product_manager_core::telemetry::MetricsRecorder;
use serde_json::{json, Value};

/// Name of the timing metric.
pub const DURATION_METRIC: &str = "Duration";

/// [`MetricsRecorder`] that prints CloudWatch Embedded Metric Format
/// documents to stdout, where the Lambda log agent picks them up.
#[derive(Debug, Clone)]
pub struct EmfMetricsRecorder {
    namespace: String,
}

impl EmfMetricsRecorder {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    /// Builds the EMF document for one timing event.
    pub fn document(
        &self,
        context: &RequestContext,
        source: &str,
        operation: Operation,
        duration: Duration,
        timestamp_millis: i64,
    ) -> Value {
        json!({
            "_aws": {
                "Timestamp": timestamp_millis,
                "CloudWatchMetrics": [{
                    "Namespace": self.namespace,
                    "Dimensions": [["Service", "Operation"]],
                    "Metrics": [{ "Name": DURATION_METRIC, "Unit": "Milliseconds" }]
                }]
            },
            "Service": source,
            "Operation": operation.as_str(),
            "ProductId": context.resource_id,
            "RequestId": context.request_id,
            DURATION_METRIC: duration.as_micros() as f64 / 1000.0
        })
    }
}

impl MetricsRecorder for EmfMetricsRecorder {
    fn record_metric_event(
        &self,
        context: &RequestContext,
        source: &str,
        operation: Operation,
        duration: Duration,
    ) {
        let document = self.document(
            context,
            source,
            operation,
            duration,
            chrono::Utc::now().timestamp_millis(),
        );
        println!("{}", document);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emf_document_shape() {
        let recorder = EmfMetricsRecorder::new("ProductManager");
        let context = RequestContext::new("P1").with_request_id("req-1");

        let doc = recorder.document(
            &context,
            "ProductManager",
            Operation::GetProduct,
            Duration::from_millis(12),
            1_700_000_000_000,
        );

        assert_eq!(doc["_aws"]["Timestamp"], 1_700_000_000_000_i64);
        assert_eq!(
            doc["_aws"]["CloudWatchMetrics"][0]["Namespace"],
            "ProductManager"
        );
        assert_eq!(
            doc["_aws"]["CloudWatchMetrics"][0]["Dimensions"],
            json!([["Service", "Operation"]])
        );
        assert_eq!(
            doc["_aws"]["CloudWatchMetrics"][0]["Metrics"][0]["Name"],
            "Duration"
        );
        assert_eq!(doc["Service"], "ProductManager");
        assert_eq!(doc["Operation"], "GetProduct");
        assert_eq!(doc["ProductId"], "P1");
        assert_eq!(doc["RequestId"], "req-1");
        assert_eq!(doc["Duration"], 12.0);
    }

    #[test]
    fn test_missing_request_id_is_null() {
        let recorder = EmfMetricsRecorder::new("ns");
        let doc = recorder.document(
            &RequestContext::new("P1"),
            "ProductManager",
            Operation::DeleteProduct,
            Duration::ZERO,
            0,
        );

        assert!(doc["RequestId"].is_null());
        assert_eq!(doc["Duration"], 0.0);
    }
}
