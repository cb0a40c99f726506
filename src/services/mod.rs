pub mod aggregate;
pub mod catalogs;
pub mod categories;
pub mod envelope;
pub mod errors;
pub mod posts;
pub mod tags;
pub mod translations;

pub use envelope::{Envelope, FieldErrors, Rejection, RejectionKind};
pub use errors::{InfrastructureError, ServiceError, ServiceResult};

/// Fold a workflow result into an envelope without logging.
pub(crate) fn capture<T>(result: Result<T, ServiceError>) -> ServiceResult<Envelope<T>> {
    match result {
        Ok(value) => Ok(Envelope::Success(value)),
        Err(ServiceError::Rejected(rejection)) => Ok(Envelope::Error(rejection)),
        Err(ServiceError::Infrastructure(err)) => Err(err),
    }
}

/// Fold a workflow result into an envelope, logging rejections and failures.
pub(crate) fn settle<T>(
    operation: &str,
    result: Result<T, ServiceError>,
) -> ServiceResult<Envelope<T>> {
    match &result {
        Err(ServiceError::Rejected(rejection)) => {
            log::warn!("Rejected {operation}: {rejection}");
        }
        Err(ServiceError::Infrastructure(err)) => {
            log::error!("Failed to {operation}: {err}");
        }
        Ok(_) => {}
    }
    capture(result)
}
