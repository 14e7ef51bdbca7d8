//! Error taxonomy of the query façade.

use super::selector::SelectorError;
use super::validation::ValidationError;
use crate::db::repository::RepositoryError;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Outcome of a façade operation that did not produce a payload.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// A week or day token could not be parsed. Raised before storage is read.
    #[error(transparent)]
    SelectorInvalid(#[from] SelectorError),

    /// A write payload was rejected. Raised before storage is written.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request is not well-formed (e.g. a non-numeric id).
    #[error("{0}")]
    Malformed(String),

    /// The id, group or narrowed view matched nothing.
    #[error("{0}")]
    NotFound(String),

    /// The storage collaborator failed. Never retried here.
    #[error("Unexpected error")]
    Storage(#[source] RepositoryError),
}

impl ServiceError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        if err.is_not_found() {
            return ServiceError::NotFound("Record not found".to_string());
        }
        log::error!("Storage failure: {}", err);
        ServiceError::Storage(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_hides_details() {
        let err: ServiceError =
            RepositoryError::connection("password authentication failed for user").into();
        assert!(matches!(err, ServiceError::Storage(_)));
        assert_eq!(err.to_string(), "Unexpected error");
    }

    #[test]
    fn test_repository_not_found_becomes_not_found() {
        let err: ServiceError = RepositoryError::not_found("Lesson 3 not found").into();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
