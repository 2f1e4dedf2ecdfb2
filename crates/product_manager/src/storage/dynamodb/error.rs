//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `RepositoryError` from `product_manager_core::storage`,
//! classifying each failure by [`ErrorKind`].

use std::fmt::Debug;

use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::operation::create_table::CreateTableError;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::describe_table::DescribeTableError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use product_manager_core::storage::{ErrorKind, RepositoryError};

/// Classify an error code reported by DynamoDB.
pub fn kind_from_code(code: &str) -> ErrorKind {
    match code {
        "ProvisionedThroughputExceededException"
        | "ThrottlingException"
        | "RequestLimitExceeded"
        | "LimitExceededException" => ErrorKind::Throttled,
        "AccessDeniedException"
        | "UnrecognizedClientException"
        | "MissingAuthenticationTokenException"
        | "InvalidSignatureException"
        | "IncompleteSignature"
        | "ExpiredTokenException" => ErrorKind::PermissionDenied,
        "ValidationException" | "SerializationException" => ErrorKind::MalformedKey,
        "ResourceNotFoundException" => ErrorKind::ResourceNotFound,
        "RequestTimeout" | "RequestTimeoutException" => ErrorKind::Timeout,
        _ => ErrorKind::Unknown,
    }
}

/// Timeouts raised by the SDK before any service response arrived.
fn transport_kind<E, R>(err: &SdkError<E, R>) -> Option<ErrorKind> {
    match err {
        SdkError::TimeoutError(_) => Some(ErrorKind::Timeout),
        SdkError::DispatchFailure(failure) if failure.is_timeout() => Some(ErrorKind::Timeout),
        _ => None,
    }
}

/// Classify errors not modeled by the operation's error enum.
fn unmodeled_kind<E: ProvideErrorMetadata>(err: &E) -> ErrorKind {
    err.code().map(kind_from_code).unwrap_or(ErrorKind::Unknown)
}

fn backend_error<E, R>(err: SdkError<E, R>, kind: ErrorKind, context: String) -> RepositoryError
where
    E: std::error::Error + 'static,
    R: Debug,
{
    RepositoryError::backend(kind, format!("{}: {}", context, DisplayErrorContext(&err)))
}

/// Map a GetItem SDK error to RepositoryError.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
    product_id: &str,
) -> RepositoryError {
    let kind = transport_kind(&err).unwrap_or_else(|| match err.as_service_error() {
        Some(GetItemError::ProvisionedThroughputExceededException(_))
        | Some(GetItemError::RequestLimitExceeded(_)) => ErrorKind::Throttled,
        Some(GetItemError::ResourceNotFoundException(_)) => ErrorKind::ResourceNotFound,
        Some(other) => unmodeled_kind(other),
        None => ErrorKind::Unknown,
    });
    backend_error(err, kind, format!("GetItem failed for {}", product_id))
}

/// Map a PutItem SDK error to RepositoryError.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
    product_id: &str,
) -> RepositoryError {
    let kind = transport_kind(&err).unwrap_or_else(|| match err.as_service_error() {
        Some(PutItemError::ProvisionedThroughputExceededException(_))
        | Some(PutItemError::RequestLimitExceeded(_)) => ErrorKind::Throttled,
        Some(PutItemError::ResourceNotFoundException(_)) => ErrorKind::ResourceNotFound,
        Some(other) => unmodeled_kind(other),
        None => ErrorKind::Unknown,
    });
    backend_error(err, kind, format!("PutItem failed for {}", product_id))
}

/// Map a DeleteItem SDK error to RepositoryError.
pub fn map_delete_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteItemError, R>,
    product_id: &str,
) -> RepositoryError {
    let kind = transport_kind(&err).unwrap_or_else(|| match err.as_service_error() {
        Some(DeleteItemError::ProvisionedThroughputExceededException(_))
        | Some(DeleteItemError::RequestLimitExceeded(_)) => ErrorKind::Throttled,
        Some(DeleteItemError::ResourceNotFoundException(_)) => ErrorKind::ResourceNotFound,
        Some(other) => unmodeled_kind(other),
        None => ErrorKind::Unknown,
    });
    backend_error(err, kind, format!("DeleteItem failed for {}", product_id))
}

/// Returns true when DescribeTable failed because the table does not exist.
pub fn is_table_missing<R>(err: &SdkError<DescribeTableError, R>) -> bool {
    matches!(
        err.as_service_error(),
        Some(DescribeTableError::ResourceNotFoundException(_))
    )
}

/// Returns true when CreateTable failed because the table is already being
/// created (or exists).
pub fn is_table_in_use<R>(err: &SdkError<CreateTableError, R>) -> bool {
    matches!(
        err.as_service_error(),
        Some(CreateTableError::ResourceInUseException(_))
    )
}

/// Map any error raised while provisioning the table to RepositoryError.
pub fn map_table_error<E, R>(err: SdkError<E, R>, table_name: &str) -> RepositoryError
where
    E: std::error::Error + 'static,
    R: Debug,
{
    RepositoryError::TableCreation {
        table_name: table_name.to_string(),
        message: DisplayErrorContext(&err).to_string(),
    }
}
