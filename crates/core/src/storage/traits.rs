use async_trait::async_trait;

use crate::product::ProductRecord;

use super::{Result, TableConfig};

/// Single-key access to the product table.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Gets a product by its id. A missing product is `Ok(None)`.
    async fn get_product(&self, product_id: &str) -> Result<Option<ProductRecord>>;

    /// Writes a product, unconditionally replacing any existing item.
    async fn put_product(&self, product: &ProductRecord) -> Result<()>;

    /// Deletes a product by its id. Deleting a missing product succeeds.
    async fn delete_product(&self, product_id: &str) -> Result<()>;

    /// Creates the table described by `config` if it does not exist yet and
    /// waits until it is usable.
    async fn ensure_table(&self, config: &TableConfig) -> Result<()>;
}
