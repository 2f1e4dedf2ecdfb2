use serde::Serialize;

use crate::storage::ErrorKind;

/// Normalized response returned by every gateway operation.
///
/// `body` is never absent: a missing document and a body-less success both
/// carry the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEnvelope {
    pub status_code: u16,
    pub body: String,
}

impl ResponseEnvelope {
    /// Creates an envelope, normalizing an absent body to `""`.
    pub fn new(status_code: u16, body: Option<String>) -> Self {
        Self {
            status_code,
            body: body.unwrap_or_default(),
        }
    }

    /// `200` with the given body.
    pub fn ok(body: Option<String>) -> Self {
        Self::new(200, body)
    }

    /// `200` with an empty body.
    pub fn empty() -> Self {
        Self::new(200, None)
    }

    /// Returns true for 2xx status codes.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// JSON payload carried in the body of a failed operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub kind: ErrorKind,
    pub message: String,
}
