//! Domain Layer - Errors
//!
//! Shared error and result types for all layers.

use thiserror::Error;

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),
    /// Rejected user input; nothing was changed
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Snapshot could not be read, parsed or written
    #[error("Storage error: {0}")]
    Storage(String),
    /// Price lookup failed
    #[error("Price lookup failed: {0}")]
    Provider(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn is_validation(&self) -> bool {
        matches!(self, DomainError::InvalidInput(_))
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::Storage(err.to_string())
    }
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        DomainError::Storage(err.to_string())
    }
}
