//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and
//! product records. These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use product_manager_core::product::ProductRecord;
use product_manager_core::storage::{RepositoryError, PRODUCT_ID_ATTRIBUTE};

/// Attribute holding the stored document.
pub const DOCUMENT_ATTRIBUTE: &str = "doc";

/// Convert a ProductRecord to DynamoDB item.
///
/// A record without a document is written with a NULL `doc` attribute.
pub fn product_to_item(product: &ProductRecord) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();

    item.insert(
        PRODUCT_ID_ATTRIBUTE.to_string(),
        AttributeValue::S(product.product_id.clone()),
    );
    let document = match &product.document {
        Some(doc) => AttributeValue::S(doc.clone()),
        None => AttributeValue::Null(true),
    };
    item.insert(DOCUMENT_ATTRIBUTE.to_string(), document);

    item
}

/// Convert a DynamoDB item to ProductRecord.
pub fn item_to_product(
    item: &HashMap<String, AttributeValue>,
) -> Result<ProductRecord, RepositoryError> {
    Ok(ProductRecord {
        product_id: get_string(item, PRODUCT_ID_ATTRIBUTE)?,
        document: get_document(item)?,
    })
}

/// Build the key map for a product id.
pub fn product_key(product_id: &str) -> HashMap<String, AttributeValue> {
    HashMap::from([(
        PRODUCT_ID_ATTRIBUTE.to_string(),
        AttributeValue::S(product_id.to_string()),
    )])
}

/// Get a required string attribute.
fn get_string(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<String, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))
}

/// Get the document attribute. Missing and NULL both mean no document.
fn get_document(item: &HashMap<String, AttributeValue>) -> Result<Option<String>, RepositoryError> {
    match item.get(DOCUMENT_ATTRIBUTE) {
        None | Some(AttributeValue::Null(_)) => Ok(None),
        Some(AttributeValue::S(doc)) => Ok(Some(doc.clone())),
        Some(_) => Err(RepositoryError::InvalidData(format!(
            "Invalid field: {} is not a string",
            DOCUMENT_ATTRIBUTE
        ))),
    }
}
