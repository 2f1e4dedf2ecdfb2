//! DynamoDB storage backend implementation.
//!
//! This module provides a DynamoDB-based implementation of
//! [`ProductRepository`](product_manager_core::storage::ProductRepository)
//! using `aws-sdk-dynamodb`.

mod conversions;
mod error;
mod repository;
mod table;

pub use repository::{create_client, DynamoDbRepository};
