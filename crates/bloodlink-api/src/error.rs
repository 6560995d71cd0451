//! Maps domain `AppError` to HTTP responses.
//!
//! `AppError` lives in `bloodlink-core`, which knows nothing about HTTP;
//! the [`ApiError`] newtype carries it across the axum boundary. Handler
//! code still works with `AppError` directly — the `From` impl lets `?`
//! do the conversion.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use bloodlink_core::error::{AppError, ErrorKind};

/// Standard API error response body.
///
/// Clients key off `message`; `error` is the machine-readable kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Newtype over [`AppError`] that renders as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = match err.kind {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::Validation | ErrorKind::InvalidRating | ErrorKind::InvalidTarget => {
                StatusCode::BAD_REQUEST
            }
            ErrorKind::Conflict
            | ErrorKind::InvalidState
            | ErrorKind::DonorUnavailable
            | ErrorKind::DonorSuspended => StatusCode::CONFLICT,
            ErrorKind::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::Internal
            | ErrorKind::Database
            | ErrorKind::Configuration
            | ErrorKind::Serialization => {
                tracing::error!(error = %err.message, kind = %err.kind, "Internal server error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ApiErrorResponse {
            error: err.kind.to_string(),
            message: err.message,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        ApiError::from(err).into_response().status()
    }

    #[test]
    fn test_lifecycle_kinds_map_to_conflict() {
        for err in [
            AppError::invalid_state("x"),
            AppError::donor_unavailable("x"),
            AppError::donor_suspended("x"),
        ] {
            assert_eq!(status_of(err), StatusCode::CONFLICT);
        }
    }

    #[test]
    fn test_bad_input_kinds_map_to_bad_request() {
        for err in [
            AppError::invalid_rating("x"),
            AppError::invalid_target("x"),
            AppError::validation("x"),
        ] {
            assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_actor_mismatch_maps_to_forbidden() {
        assert_eq!(status_of(AppError::forbidden("x")), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_missing_resource_maps_to_not_found() {
        assert_eq!(status_of(AppError::not_found("x")), StatusCode::NOT_FOUND);
    }
}
