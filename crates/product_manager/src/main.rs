mod config;
mod gateway;
mod handler;
mod storage;
mod telemetry;

use std::sync::Arc;

use anyhow::{Context, Result};
use lambda_runtime::service_fn;
use product_manager_core::storage::{product_table_config, ProductRepository};

use crate::{
    config::Config,
    gateway::ProductRecordGateway,
    handler::function_handler,
    telemetry::{init_tracing, EmfMetricsRecorder, TracingLogger},
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    init_tracing(config.log_format);

    let repository = init_repository(&config).await;
    let gateway = ProductRecordGateway::new(
        repository,
        Arc::new(TracingLogger),
        Arc::new(EmfMetricsRecorder::new(config.metrics_namespace.clone())),
        product_table_config().with_table_name(&config.table_name),
    );

    tracing::info!(table = %config.table_name, "Product manager starting");

    lambda_runtime::run(service_fn(|event| function_handler(&gateway, event)))
        .await
        .map_err(|e| anyhow::anyhow!(e))
}

/// Build the DynamoDB repository shared by all invocations.
#[cfg(feature = "dynamodb")]
async fn init_repository(config: &Config) -> Arc<dyn ProductRepository> {
    use crate::storage::dynamodb::{create_client, DynamoDbRepository};

    tracing::info!(target_store = %config.target_display(), "Using DynamoDB storage");

    let client = create_client(config).await;
    Arc::new(DynamoDbRepository::from_config(client, config))
}

/// Build an in-memory repository; data lives as long as the execution environment.
#[cfg(feature = "inmemory")]
async fn init_repository(config: &Config) -> Arc<dyn ProductRepository> {
    use crate::storage::inmemory::InMemoryRepository;

    tracing::warn!(
        ignored_target = %config.target_display(),
        "Using in-memory storage, data is not persisted"
    );

    Arc::new(InMemoryRepository::new())
}
