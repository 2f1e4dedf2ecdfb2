mod error;
mod http_mapping;
mod schema;
mod traits;

pub use error::{ErrorKind, RepositoryError, Result};
pub use http_mapping::{error_to_envelope, repository_error_to_status_code};
pub use schema::{
    product_table_config, AttributeType, KeyAttribute, ProvisionedThroughput, TableConfig,
    PRODUCT_ID_ATTRIBUTE,
};
pub use traits::ProductRepository;
