//! Product record gateway.
//!
//! Each operation logs its intent, times exactly one storage exchange, maps
//! the outcome onto a [`ResponseEnvelope`] and records the timing metric
//! whether or not the store call succeeded. Storage errors never escape an
//! operation; they become 500 envelopes.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use product_manager_core::product::{Operation, RequestContext, ResponseEnvelope, SOURCE};
use product_manager_core::storage::{
    error_to_envelope, ProductRepository, RepositoryError, Result, TableConfig,
};
use product_manager_core::telemetry::{LogEntry, Logger, MetricsRecorder};

/// Orchestrates storage, logging and metrics for product requests.
#[derive(Clone)]
pub struct ProductRecordGateway {
    repository: Arc<dyn ProductRepository>,
    logger: Arc<dyn Logger>,
    metrics: Arc<dyn MetricsRecorder>,
    table_config: TableConfig,
}

impl ProductRecordGateway {
    pub fn new(
        repository: Arc<dyn ProductRepository>,
        logger: Arc<dyn Logger>,
        metrics: Arc<dyn MetricsRecorder>,
        table_config: TableConfig,
    ) -> Self {
        Self {
            repository,
            logger,
            metrics,
            table_config,
        }
    }

    /// Reads the product named by `resource_id`.
    ///
    /// A missing product is a success with an empty body.
    pub async fn fetch(&self, context: &RequestContext) -> ResponseEnvelope {
        self.run(context, Operation::GetProduct, async {
            let product = self.repository.get_product(&context.resource_id).await?;
            Ok::<_, RepositoryError>(ResponseEnvelope::ok(product.and_then(|p| p.document)))
        })
        .await
    }

    /// Creates the table if needed, then overwrites the product with the
    /// request body.
    pub async fn upsert(&self, context: &RequestContext) -> ResponseEnvelope {
        self.run(context, Operation::UpdateProduct, async {
            self.repository.ensure_table(&self.table_config).await?;
            self.repository.put_product(&context.to_record()).await?;
            Ok::<_, RepositoryError>(ResponseEnvelope::empty())
        })
        .await
    }

    /// Deletes the product. Deleting a missing product succeeds.
    pub async fn delete(&self, context: &RequestContext) -> ResponseEnvelope {
        self.run(context, Operation::DeleteProduct, async {
            self.repository
                .delete_product(&context.resource_id)
                .await?;
            Ok::<_, RepositoryError>(ResponseEnvelope::empty())
        })
        .await
    }

    async fn run<F>(
        &self,
        context: &RequestContext,
        operation: Operation,
        call: F,
    ) -> ResponseEnvelope
    where
        F: Future<Output = Result<ResponseEnvelope>>,
    {
        self.logger.log(
            context,
            SOURCE,
            &LogEntry::new(operation.log_message(), context.resource_id.as_str()),
        );

        let start = Instant::now();
        let response = match call.await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(
                    operation = %operation,
                    product_id = %context.resource_id,
                    kind = %err.kind(),
                    error = %err,
                    "Storage operation failed"
                );
                error_to_envelope(&err)
            }
        };

        self.metrics
            .record_metric_event(context, SOURCE, operation, start.elapsed());
        response
    }
}
