use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Classification of a storage failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Timeout,
    Throttled,
    PermissionDenied,
    MalformedKey,
    ResourceNotFound,
    TableCreation,
    InvalidData,
    Unknown,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Timeout => "timeout",
            ErrorKind::Throttled => "throttled",
            ErrorKind::PermissionDenied => "permission_denied",
            ErrorKind::MalformedKey => "malformed_key",
            ErrorKind::ResourceNotFound => "resource_not_found",
            ErrorKind::TableCreation => "table_creation",
            ErrorKind::InvalidData => "invalid_data",
            ErrorKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Storage backend error ({kind}): {message}")]
    Backend { kind: ErrorKind, message: String },
    #[error("Table creation failed for {table_name}: {message}")]
    TableCreation { table_name: String, message: String },
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl RepositoryError {
    /// Creates a backend error of the given kind.
    pub fn backend(kind: ErrorKind, message: impl Into<String>) -> Self {
        RepositoryError::Backend {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RepositoryError::Backend { kind, .. } => *kind,
            RepositoryError::TableCreation { .. } => ErrorKind::TableCreation,
            RepositoryError::InvalidData(_) => ErrorKind::InvalidData,
        }
    }

    /// The raw message reported by the backend, without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            RepositoryError::Backend { message, .. } => message,
            RepositoryError::TableCreation { message, .. } => message,
            RepositoryError::InvalidData(message) => message,
        }
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
