//! Lazy table provisioning.

use std::time::Duration;

use aws_sdk_dynamodb::types::{
    AttributeDefinition, KeySchemaElement, KeyType, ProvisionedThroughput, ScalarAttributeType,
    TableStatus,
};
use aws_sdk_dynamodb::Client;
use product_manager_core::storage::{AttributeType, RepositoryError, Result, TableConfig};

use super::error::{is_table_in_use, is_table_missing, map_table_error};

/// Polling policy while waiting for a table to become active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for ActivationPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 60,
            delay: Duration::from_secs(2),
        }
    }
}

/// Fetches the current table status, returns None if the table doesn't exist.
async fn get_table_status(client: &Client, table_name: &str) -> Result<Option<TableStatus>> {
    match client.describe_table().table_name(table_name).send().await {
        Ok(response) => Ok(Some(
            response
                .table()
                .and_then(|table| table.table_status())
                .cloned()
                .unwrap_or(TableStatus::Active),
        )),
        Err(err) if is_table_missing(&err) => Ok(None),
        Err(err) => Err(map_table_error(err, table_name)),
    }
}

/// Creates the table if it does not exist.
///
/// An existing table is used as is, whatever its status, except while it is
/// being created (waits for it) or deleted (fails). Waiting only happens
/// after this call or a concurrent one issued CreateTable.
pub async fn ensure_table(
    client: &Client,
    config: &TableConfig,
    policy: ActivationPolicy,
) -> Result<()> {
    match get_table_status(client, &config.table_name).await? {
        None => {
            tracing::info!(table = %config.table_name, "Creating table");
            create_table(client, config).await?;
            wait_for_table_active(client, &config.table_name, policy).await
        }
        Some(TableStatus::Creating) => {
            tracing::debug!(table = %config.table_name, "Table is being created");
            wait_for_table_active(client, &config.table_name, policy).await
        }
        Some(TableStatus::Deleting) => Err(RepositoryError::TableCreation {
            table_name: config.table_name.clone(),
            message: "Table is being deleted".to_string(),
        }),
        Some(_) => Ok(()),
    }
}

async fn create_table(client: &Client, config: &TableConfig) -> Result<()> {
    let table_name = config.table_name.as_str();
    let build_error = |e: aws_sdk_dynamodb::error::BuildError| RepositoryError::TableCreation {
        table_name: table_name.to_string(),
        message: e.to_string(),
    };

    let key_schema = KeySchemaElement::builder()
        .attribute_name(&config.partition_key.name)
        .key_type(KeyType::Hash)
        .build()
        .map_err(build_error)?;

    let attribute_definition = AttributeDefinition::builder()
        .attribute_name(&config.partition_key.name)
        .attribute_type(to_scalar_type(&config.partition_key.attribute_type))
        .build()
        .map_err(build_error)?;

    let throughput = ProvisionedThroughput::builder()
        .read_capacity_units(config.provisioned_throughput.read_capacity_units)
        .write_capacity_units(config.provisioned_throughput.write_capacity_units)
        .build()
        .map_err(build_error)?;

    let result = client
        .create_table()
        .table_name(table_name)
        .key_schema(key_schema)
        .attribute_definitions(attribute_definition)
        .provisioned_throughput(throughput)
        .send()
        .await;

    match result {
        Ok(_) => Ok(()),
        // Another invocation created it first.
        Err(err) if is_table_in_use(&err) => {
            tracing::debug!(table = %table_name, "Table already being created");
            Ok(())
        }
        Err(err) => Err(map_table_error(err, table_name)),
    }
}

async fn wait_for_table_active(
    client: &Client,
    table_name: &str,
    policy: ActivationPolicy,
) -> Result<()> {
    for _ in 0..policy.max_attempts {
        if let Some(TableStatus::Active) = get_table_status(client, table_name).await? {
            tracing::info!(table = %table_name, "Table is active");
            return Ok(());
        }
        tokio::time::sleep(policy.delay).await;
    }

    Err(RepositoryError::TableCreation {
        table_name: table_name.to_string(),
        message: format!(
            "Timeout waiting for table to become active after {} attempts",
            policy.max_attempts
        ),
    })
}

fn to_scalar_type(attr_type: &AttributeType) -> ScalarAttributeType {
    match attr_type {
        AttributeType::String => ScalarAttributeType::S,
    }
}

#[cfg(test)]
mod tests {
    use aws_sdk_dynamodb::error::ErrorMetadata;
    use aws_sdk_dynamodb::operation::create_table::{CreateTableError, CreateTableOutput};
    use aws_sdk_dynamodb::operation::describe_table::{DescribeTableError, DescribeTableOutput};
    use aws_sdk_dynamodb::types::error::{ResourceInUseException, ResourceNotFoundException};
    use aws_sdk_dynamodb::types::TableDescription;
    use aws_smithy_mocks::{mock, mock_client, RuleMode};
    use product_manager_core::storage::{product_table_config, ErrorKind};

    use super::*;

    fn fast_policy() -> ActivationPolicy {
        ActivationPolicy {
            max_attempts: 3,
            delay: Duration::from_millis(1),
        }
    }

    fn described(status: TableStatus) -> DescribeTableOutput {
        DescribeTableOutput::builder()
            .table(TableDescription::builder().table_status(status).build())
            .build()
    }

    fn table_missing() -> DescribeTableError {
        DescribeTableError::ResourceNotFoundException(ResourceNotFoundException::builder().build())
    }

    fn table_created() -> CreateTableOutput {
        CreateTableOutput::builder().build()
    }

    #[test]
    fn test_default_activation_policy() {
        let policy = ActivationPolicy::default();

        assert_eq!(policy.max_attempts, 60);
        assert_eq!(policy.delay, Duration::from_secs(2));
    }

    #[test]
    fn test_string_attribute_maps_to_s() {
        assert_eq!(to_scalar_type(&AttributeType::String), ScalarAttributeType::S);
    }

    #[tokio::test]
    async fn test_active_table_is_not_created() {
        let describe =
            mock!(Client::describe_table).then_output(|| described(TableStatus::Active));
        let create = mock!(Client::create_table).then_output(table_created);
        let client = mock_client!(aws_sdk_dynamodb, RuleMode::MatchAny, &[&describe, &create]);

        let result = ensure_table(&client, &product_table_config(), fast_policy()).await;

        assert!(result.is_ok());
        assert_eq!(describe.num_calls(), 1);
        assert_eq!(create.num_calls(), 0);
    }

    #[tokio::test]
    async fn test_updating_table_is_used_without_waiting() {
        let describe =
            mock!(Client::describe_table).then_output(|| described(TableStatus::Updating));
        let create = mock!(Client::create_table).then_output(table_created);
        let client = mock_client!(aws_sdk_dynamodb, RuleMode::MatchAny, &[&describe, &create]);

        let result = ensure_table(&client, &product_table_config(), fast_policy()).await;

        assert!(result.is_ok());
        assert_eq!(describe.num_calls(), 1);
        assert_eq!(create.num_calls(), 0);
    }

    #[tokio::test]
    async fn test_deleting_table_fails_immediately() {
        let describe =
            mock!(Client::describe_table).then_output(|| described(TableStatus::Deleting));
        let create = mock!(Client::create_table).then_output(table_created);
        let client = mock_client!(aws_sdk_dynamodb, RuleMode::MatchAny, &[&describe, &create]);

        let result = ensure_table(&client, &product_table_config(), fast_policy()).await;

        assert!(matches!(result, Err(RepositoryError::TableCreation { .. })));
        assert_eq!(describe.num_calls(), 1);
        assert_eq!(create.num_calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_table_is_created_and_awaited() {
        let describe = mock!(Client::describe_table)
            .sequence()
            .error(table_missing)
            .output(|| described(TableStatus::Creating))
            .output(|| described(TableStatus::Active))
            .repeatedly()
            .build();
        let create = mock!(Client::create_table)
            .match_requests(|req| {
                req.table_name() == Some("Product")
                    && req
                        .provisioned_throughput()
                        .map(|t| (t.read_capacity_units(), t.write_capacity_units()))
                        == Some((5, 5))
            })
            .then_output(table_created);
        let client = mock_client!(aws_sdk_dynamodb, RuleMode::MatchAny, &[&describe, &create]);

        let result = ensure_table(&client, &product_table_config(), fast_policy()).await;

        assert!(result.is_ok());
        assert_eq!(create.num_calls(), 1);
        assert_eq!(describe.num_calls(), 3);
    }

    #[tokio::test]
    async fn test_concurrent_creation_is_tolerated() {
        let describe = mock!(Client::describe_table)
            .sequence()
            .error(table_missing)
            .output(|| described(TableStatus::Active))
            .repeatedly()
            .build();
        let create = mock!(Client::create_table).then_error(|| {
            CreateTableError::ResourceInUseException(ResourceInUseException::builder().build())
        });
        let client = mock_client!(aws_sdk_dynamodb, RuleMode::MatchAny, &[&describe, &create]);

        let result = ensure_table(&client, &product_table_config(), fast_policy()).await;

        assert!(result.is_ok());
        assert_eq!(create.num_calls(), 1);
        assert_eq!(describe.num_calls(), 2);
    }

    #[tokio::test]
    async fn test_activation_timeout_is_table_creation_error() {
        let describe = mock!(Client::describe_table)
            .sequence()
            .error(table_missing)
            .output(|| described(TableStatus::Creating))
            .repeatedly()
            .build();
        let create = mock!(Client::create_table).then_output(table_created);
        let client = mock_client!(aws_sdk_dynamodb, RuleMode::MatchAny, &[&describe, &create]);

        let result = ensure_table(&client, &product_table_config(), fast_policy()).await;

        match result {
            Err(RepositoryError::TableCreation {
                table_name,
                message,
            }) => {
                assert_eq!(table_name, "Product");
                assert!(message.contains("after 3 attempts"));
            }
            other => panic!("expected TableCreation, got {:?}", other),
        }
        assert_eq!(describe.num_calls(), 4);
    }

    #[tokio::test]
    async fn test_describe_access_denied_is_table_creation_error() {
        let describe = mock!(Client::describe_table).then_error(|| {
            DescribeTableError::generic(
                ErrorMetadata::builder()
                    .code("AccessDeniedException")
                    .message("not authorized to perform dynamodb:DescribeTable")
                    .build(),
            )
        });
        let create = mock!(Client::create_table).then_output(table_created);
        let client = mock_client!(aws_sdk_dynamodb, RuleMode::MatchAny, &[&describe, &create]);

        let result = ensure_table(&client, &product_table_config(), fast_policy()).await;

        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TableCreation);
        assert!(matches!(
            err,
            RepositoryError::TableCreation { ref table_name, .. } if table_name == "Product"
        ));
        assert_eq!(create.num_calls(), 0);
    }
}
