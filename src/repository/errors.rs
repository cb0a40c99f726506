use std::fmt::Display;

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

use crate::domain::types::TypeConstraintError;

/// Errors produced by repository implementations.
///
/// `NotFound`, `Conflict` and `Validation` describe business-rule failures
/// that the caller can fix by resubmitting; the remaining variants are
/// infrastructure failures.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Referenced row does not exist.
    #[error("{0}")]
    NotFound(String),
    /// Integrity violation, e.g. deleting a row that still has children.
    #[error("{0}")]
    Conflict(String),
    /// Input references data that does not exist or is malformed.
    #[error("{field}: {message}")]
    Validation { field: String, message: String },
    /// No connection could be checked out of the pool.
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    /// Any other storage failure.
    #[error("database error: {0}")]
    Database(String),
    /// Persisted data no longer satisfies domain constraints.
    #[error("stored data violates constraints: {0}")]
    Corrupted(String),
}

/// Convenient alias for results returned from repository functions.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl RepositoryError {
    pub fn not_found(entity: &str, id: impl Display) -> Self {
        Self::NotFound(format!("{entity} {id} not found"))
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<DieselError> for RepositoryError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => Self::NotFound("record not found".to_string()),
            DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation | DatabaseErrorKind::ForeignKeyViolation,
                info,
            ) => Self::Conflict(info.message().to_string()),
            other => Self::Database(other.to_string()),
        }
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(err: TypeConstraintError) -> Self {
        Self::Corrupted(err.to_string())
    }
}
