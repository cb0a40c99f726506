use thiserror::Error;

use crate::repository::RepositoryError;
use crate::services::envelope::{FieldErrors, Rejection};

/// Storage failure unrelated to business rules.
///
/// It is never folded into an [`super::Envelope`]; it propagates to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("infrastructure failure: {0}")]
pub struct InfrastructureError(pub String);

/// Failure inside a service workflow, before it is settled into an envelope.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A business rule rejected the request; the transaction is rolled back.
    #[error("request rejected: {0}")]
    Rejected(Rejection),
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, InfrastructureError>;

impl From<Rejection> for ServiceError {
    fn from(rejection: Rejection) -> Self {
        Self::Rejected(rejection)
    }
}

impl From<FieldErrors> for ServiceError {
    fn from(fields: FieldErrors) -> Self {
        Self::Rejected(Rejection::validation(fields))
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(message) => Self::Rejected(Rejection::not_found(message)),
            RepositoryError::Conflict(message) => Self::Rejected(Rejection::conflict(message)),
            RepositoryError::Validation { field, message } => {
                Self::Rejected(Rejection::validation(FieldErrors::single(field, message)))
            }
            infrastructure @ (RepositoryError::Pool(_)
            | RepositoryError::Database(_)
            | RepositoryError::Corrupted(_)) => Self::Infrastructure(infrastructure.into()),
        }
    }
}

impl From<RepositoryError> for InfrastructureError {
    fn from(err: RepositoryError) -> Self {
        Self(err.to_string())
    }
}
