//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

use crate::guard::DenyReason;

/// Domain errors - rule violations raised before or instead of storage.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("{entity_type} with id {id} not found")]
    NotFound { entity_type: &'static str, id: Uuid },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Another account already uses this username.
    #[error("expected `username` to be unique")]
    UsernameTaken,

    #[error("Post deletion denied: {0:?}")]
    DeleteDenied(DenyReason),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}
