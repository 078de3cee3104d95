//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

/// Domain errors - business logic failures.
///
/// Registration failures and login failures share a single variant on
/// purpose: both surface the same generic message, so callers cannot probe
/// which check failed or which usernames exist.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Incorrect current password")]
    IncorrectPassword,

    #[error("Login required")]
    Unauthenticated,

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: Uuid },

    #[error("Internal error: {0}")]
    Internal(String),
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

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        DomainError::Internal(err.to_string())
    }
}
