//! Mapping of façade outcomes onto HTTP statuses and error bodies.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::ErrorBody;
use crate::services::{ServiceError, ValidationError};

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// 404: nothing matched.
    NotFound(String),
    /// 400: the request itself is malformed.
    BadRequest(String),
    /// 500 with a client-facing reason (rejected selector or payload).
    Rejected(String),
    /// 500 with a generic reason; details are logged, not returned.
    Internal,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Rejected(_) | AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn reason(self) -> String {
        match self {
            AppError::NotFound(reason)
            | AppError::BadRequest(reason)
            | AppError::Rejected(reason) => reason,
            AppError::Internal => "Unexpected error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            status: status.as_u16(),
            reason: self.reason(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::SelectorInvalid(e) => AppError::Rejected(e.to_string()),
            ServiceError::Validation(e) => match e {
                ValidationError::InvalidEmail { .. } => AppError::BadRequest(e.to_string()),
                e if e.is_malformed() => AppError::BadRequest(e.to_string()),
                e => AppError::Rejected(e.to_string()),
            },
            ServiceError::Malformed(reason) => AppError::BadRequest(reason),
            ServiceError::NotFound(reason) => AppError::NotFound(reason),
            // Already logged where the storage error was converted.
            ServiceError::Storage(_) => AppError::Internal,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::RepositoryError;
    use crate::services::parse_week;

    #[test]
    fn test_selector_error_is_500_with_reason() {
        let err: AppError = ServiceError::from(parse_week("8").unwrap_err()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.reason().contains("WEEK"));
    }

    #[test]
    fn test_validation_statuses() {
        let too_long: AppError = ServiceError::from(ValidationError::FieldTooLong {
            field: "room",
            max: 32,
            actual: 40,
        })
        .into();
        assert_eq!(too_long.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let email: AppError = ServiceError::from(ValidationError::InvalidEmail {
            email: "nobody".to_string(),
            reason: "missing '@'",
        })
        .into();
        assert_eq!(email.status(), StatusCode::BAD_REQUEST);

        let not_object: AppError = ServiceError::from(ValidationError::NotAnObject).into();
        assert_eq!(not_object.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_storage_error_reason_is_generic() {
        let err: AppError =
            ServiceError::from(RepositoryError::query("relation \"lessons\" does not exist"))
                .into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.reason(), "Unexpected error");
    }
}
