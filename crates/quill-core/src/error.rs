//! Domain-level error types.

use thiserror::Error;

use crate::domain::SortError;
use crate::id::{Id, IdError};

/// Domain errors - business logic failures.
///
/// These are the kinds the transport layer maps to status codes.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: Id },

    #[error("Conflict: {0}")]
    Conflict(String),

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

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<IdError> for DomainError {
    fn from(err: IdError) -> Self {
        DomainError::InvalidArgument(err.to_string())
    }
}

impl From<SortError> for DomainError {
    fn from(err: SortError) -> Self {
        DomainError::InvalidArgument(err.to_string())
    }
}

impl From<SortError> for RepoError {
    fn from(err: SortError) -> Self {
        RepoError::InvalidInput(err.to_string())
    }
}

/// Classify a repository error for callers that have no entity context.
///
/// `RepoError::NotFound` without an id is only produced by lookups, which
/// the service converts explicitly; anything reaching here is a fault.
impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Constraint(msg) => DomainError::Conflict(msg),
            RepoError::InvalidInput(msg) => DomainError::InvalidArgument(msg),
            RepoError::NotFound => DomainError::Internal("Unexpected missing row".to_string()),
            RepoError::Connection(msg) | RepoError::Query(msg) => DomainError::Internal(msg),
        }
    }
}
