//! DynamoDB repository implementation.
//!
//! Implements the repository trait from `product_manager_core::storage` using DynamoDB.

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;

use product_manager_core::product::ProductRecord;
use product_manager_core::storage::{ProductRepository, Result, TableConfig};

use super::conversions::{item_to_product, product_key, product_to_item};
use super::error::{map_delete_item_error, map_get_item_error, map_put_item_error};
use super::table::{ensure_table, ActivationPolicy};
use crate::config::Config;

/// Creates a DynamoDB client for the configured region and endpoint.
pub async fn create_client(config: &Config) -> Client {
    let mut sdk_config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint_url {
        sdk_config_loader = sdk_config_loader.endpoint_url(endpoint);
    }

    let sdk_config = sdk_config_loader.load().await;
    Client::new(&sdk_config)
}

/// DynamoDB-based product repository.
pub struct DynamoDbRepository {
    client: Client,
    table_name: String,
    activation: ActivationPolicy,
}

impl DynamoDbRepository {
    /// Creates a new repository with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
            activation: ActivationPolicy::default(),
        }
    }

    /// Creates a repository from the function configuration.
    pub fn from_config(client: Client, config: &Config) -> Self {
        Self::new(client, config.table_name.clone()).with_activation(ActivationPolicy {
            max_attempts: config.table_activation_attempts,
            delay: config.table_activation_delay(),
        })
    }

    /// Sets the polling policy used while waiting for a new table.
    pub fn with_activation(mut self, activation: ActivationPolicy) -> Self {
        self.activation = activation;
        self
    }
}

#[async_trait]
impl ProductRepository for DynamoDbRepository {
    async fn get_product(&self, product_id: &str) -> Result<Option<ProductRecord>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(product_key(product_id)))
            .send()
            .await
            .map_err(|e| map_get_item_error(e, product_id))?;

        match result.item {
            Some(item) => Ok(Some(item_to_product(&item)?)),
            None => Ok(None),
        }
    }

    async fn put_product(&self, product: &ProductRecord) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(product_to_item(product)))
            .send()
            .await
            .map_err(|e| map_put_item_error(e, &product.product_id))?;

        Ok(())
    }

    async fn delete_product(&self, product_id: &str) -> Result<()> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .set_key(Some(product_key(product_id)))
            .send()
            .await
            .map_err(|e| map_delete_item_error(e, product_id))?;

        Ok(())
    }

    async fn ensure_table(&self, config: &TableConfig) -> Result<()> {
        ensure_table(&self.client, config, self.activation).await
    }
}
