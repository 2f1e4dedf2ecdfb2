//! Table schema configuration (pure data).

/// Table schema configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub table_name: String,
    pub partition_key: KeyAttribute,
    pub provisioned_throughput: ProvisionedThroughput,
}

/// A key attribute definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAttribute {
    pub name: String,
    pub attribute_type: AttributeType,
}

/// DynamoDB attribute types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    String,
}

/// Provisioned read and write capacity units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProvisionedThroughput {
    pub read_capacity_units: i64,
    pub write_capacity_units: i64,
}

impl TableConfig {
    /// Sets the table name.
    pub fn with_table_name(mut self, name: &str) -> Self {
        self.table_name = name.to_string();
        self
    }
}

/// Name of the partition key attribute.
pub const PRODUCT_ID_ATTRIBUTE: &str = "ProductId";

/// Returns the table configuration for products.
pub fn product_table_config() -> TableConfig {
    TableConfig {
        table_name: "Product".to_string(),
        partition_key: KeyAttribute {
            name: PRODUCT_ID_ATTRIBUTE.to_string(),
            attribute_type: AttributeType::String,
        },
        provisioned_throughput: ProvisionedThroughput {
            read_capacity_units: 5,
            write_capacity_units: 5,
        },
    }
}
