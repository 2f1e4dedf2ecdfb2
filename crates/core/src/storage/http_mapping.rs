//! Pure functions for mapping repository errors to response envelopes.

use crate::product::{ErrorBody, ResponseEnvelope};

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// Every storage failure is reported to the caller as a 500; the error kind
/// travels in the body instead of the status.
pub fn repository_error_to_status_code(_error: &RepositoryError) -> u16 {
    500
}

/// Converts a repository error into the envelope returned to the caller.
///
/// The body is a JSON object carrying the error kind and the raw backend
/// message, falling back to the error's display text.
///
/// # Examples
///
/// ```
/// use product_manager_core::storage::{error_to_envelope, ErrorKind, RepositoryError};
///
/// let error = RepositoryError::backend(ErrorKind::Throttled, "slow down");
/// let envelope = error_to_envelope(&error);
/// assert_eq!(envelope.status_code, 500);
/// assert_eq!(envelope.body, r#"{"kind":"throttled","message":"slow down"}"#);
/// ```
pub fn error_to_envelope(error: &RepositoryError) -> ResponseEnvelope {
    let body = ErrorBody {
        kind: error.kind(),
        message: error.message().to_string(),
    };
    let body = serde_json::to_string(&body).unwrap_or_else(|_| error.to_string());

    ResponseEnvelope::new(repository_error_to_status_code(error), Some(body))
}
