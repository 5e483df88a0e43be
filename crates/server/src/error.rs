//! Unified error handling with Sentry integration.
//!
//! Route handlers return `Result<T, AppError>`. Server-side failures are
//! captured to Sentry and logged before a generic 500 is sent; every other
//! error answers with its message as a plain-text body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::services::ServiceError;

/// Application-level error type for the HTTP layer.
#[derive(Debug, Error)]
pub enum AppError {
    /// Service operation failed.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Bad request from client (malformed body, unknown referenced client).
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Service(err) => match err {
                ServiceError::InvalidData(_) => StatusCode::BAD_REQUEST,
                ServiceError::DuplicateId(_) => StatusCode::CONFLICT,
                ServiceError::ClientNotFound(_) | ServiceError::OrderNotFound(_) => {
                    StatusCode::NOT_FOUND
                }
                ServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
            // Don't expose internal error details to clients
            return (status, "Internal server error").into_response();
        }

        tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        (status, self.to_string()).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::RepositoryError;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::from(ServiceError::client_not_found("J001"));
        assert_eq!(err.to_string(), "client with id J001 not found");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(ServiceError::InvalidData("x".to_string()).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(ServiceError::DuplicateId("x".to_string()).into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(ServiceError::ClientNotFound("x".to_string()).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(ServiceError::OrderNotFound("x".to_string()).into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::BadRequest("x".to_string())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_repository_error_is_internal() {
        let err: AppError =
            ServiceError::Repository(RepositoryError::DataCorruption("bad row".to_string())).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
