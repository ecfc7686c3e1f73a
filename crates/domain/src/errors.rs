//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Copion
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum CopionError {
    /// Unknown profile id (or any other missing record)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed caller input; the operation was aborted without mutation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Snapshot read/write failure
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CopionError {
    /// Shorthand for the unknown-profile case.
    pub fn profile_not_found(id: &str) -> Self {
        Self::NotFound(format!("profile '{id}'"))
    }

    /// Whether the error was caused by the caller rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::InvalidInput(_))
    }
}

/// Result type alias for Copion operations
pub type Result<T> = std::result::Result<T, CopionError>;
