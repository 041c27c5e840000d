//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use jurist_core::error::{AppError, ErrorKind};
use jurist_core::types::ApiErrorResponse;

/// HTTP-facing wrapper so handlers can return domain errors with `?`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// Status code and machine-readable error code for an error kind.
pub fn status_for(kind: ErrorKind) -> (StatusCode, &'static str) {
    match kind {
        ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        ErrorKind::Authentication => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
        ErrorKind::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
        ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
        ErrorKind::RateLimited => (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED"),
        ErrorKind::DependencyFailure => (StatusCode::BAD_GATEWAY, "DEPENDENCY_FAILURE"),
        ErrorKind::ServiceUnavailable => (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
        ErrorKind::Internal
        | ErrorKind::Database
        | ErrorKind::Storage
        | ErrorKind::Configuration
        | ErrorKind::Serialization => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let (status, error_code) = status_for(err.kind);

        let body = if status.is_server_error() && status != StatusCode::BAD_GATEWAY {
            tracing::error!(kind = %err.kind, error = %err, "Internal server error");
            ApiErrorResponse::new(error_code, "Internal server error")
        } else {
            if status == StatusCode::BAD_GATEWAY {
                tracing::warn!(error = %err, "Upstream dependency failed");
            }
            ApiErrorResponse {
                details: err.details,
                ..ApiErrorResponse::new(error_code, err.message)
            }
        };

        (status, Json(body)).into_response()
    }
}
