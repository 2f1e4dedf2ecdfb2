//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use product_manager_core::product::ProductRecord;
use product_manager_core::storage::{
    ErrorKind, ProductRepository, RepositoryError, Result, TableConfig,
};

/// Repository operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryOperation {
    Get,
    Put,
    Delete,
    EnsureTable,
}

/// In-memory storage backend for testing.
///
/// Empty product ids are rejected the way DynamoDB rejects empty key
/// attributes.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    products: Arc<RwLock<HashMap<String, ProductRecord>>>,
    failures: Arc<RwLock<HashMap<RepositoryOperation, RepositoryError>>>,
    tables: Arc<RwLock<Vec<String>>>,
    calls: Arc<AtomicUsize>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call of `operation` fail with `error`.
    #[cfg(test)]
    pub async fn fail(&self, operation: RepositoryOperation, error: RepositoryError) {
        self.failures.write().await.insert(operation, error);
    }

    /// Clears all injected failures.
    #[cfg(test)]
    pub async fn clear_failures(&self) {
        self.failures.write().await.clear();
    }

    /// Names of the tables created through `ensure_table`.
    #[cfg(test)]
    pub async fn tables(&self) -> Vec<String> {
        self.tables.read().await.clone()
    }

    /// Number of repository calls made so far.
    #[cfg(test)]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn check(&self, operation: RepositoryOperation, product_id: Option<&str>) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = self.failures.read().await.get(&operation) {
            return Err(error.clone());
        }
        if product_id == Some("") {
            return Err(RepositoryError::backend(
                ErrorKind::MalformedKey,
                "One or more parameter values are not valid. The AttributeValue for a key \
                 attribute cannot contain an empty string value. Key: ProductId",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for InMemoryRepository {
    async fn get_product(&self, product_id: &str) -> Result<Option<ProductRecord>> {
        self.check(RepositoryOperation::Get, Some(product_id)).await?;
        let products = self.products.read().await;
        Ok(products.get(product_id).cloned())
    }

    async fn put_product(&self, product: &ProductRecord) -> Result<()> {
        self.check(RepositoryOperation::Put, Some(product.product_id.as_str()))
            .await?;
        let mut products = self.products.write().await;
        products.insert(product.product_id.clone(), product.clone());
        Ok(())
    }

    async fn delete_product(&self, product_id: &str) -> Result<()> {
        self.check(RepositoryOperation::Delete, Some(product_id))
            .await?;
        let mut products = self.products.write().await;
        products.remove(product_id);
        Ok(())
    }

    async fn ensure_table(&self, config: &TableConfig) -> Result<()> {
        self.check(RepositoryOperation::EnsureTable, None).await?;
        let mut tables = self.tables.write().await;
        if !tables.contains(&config.table_name) {
            tables.push(config.table_name.clone());
        }
        Ok(())
    }
}
