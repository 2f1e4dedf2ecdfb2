use product_manager_core::product::RequestContext;
use product_manager_core::telemetry::{LogEntry, Logger};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogFormat;

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter of `product_manager=info`.
pub fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "product_manager=info".into());

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_target(false),
            )
            .init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// [`Logger`] that emits each entry as a `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, context: &RequestContext, source: &str, entry: &LogEntry) {
        tracing::info!(
            source = source,
            product_id = %entry.product_id,
            request_id = context.request_id.as_deref().unwrap_or("-"),
            "{}",
            entry.message
        );
    }
}
