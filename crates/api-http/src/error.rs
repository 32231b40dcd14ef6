//! HTTP Error Types
//!
//! Maps application errors to status codes with a `{"detail": ...}` body.

use crate::types::ErrorResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use relay_core::error::AppError;
use thiserror::Error;

/// Endpoint-level fault
#[derive(Debug, Error)]
pub enum ApiError {
    /// Script could not be resolved (absent or malformed name)
    #[error("{0}")]
    NotFound(String),

    /// Request body could not be parsed
    #[error("{0}")]
    InvalidRequest(String),

    /// Store, spawn or execution fault
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::NotFound(msg) => ApiError::NotFound(msg),
            AppError::InvalidName(msg) => ApiError::NotFound(msg),
            AppError::Execution(e) => ApiError::Internal(e.to_string()),
            AppError::Store(msg) => ApiError::Internal(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = %status, detail = %self, "Request failed");
        } else {
            tracing::info!(status = %status, detail = %self, "Request rejected");
        }

        let body = ErrorResponse {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_core::domain::DomainError;
    use relay_core::port::ExecutionError;

    #[test]
    fn test_mapping() {
        let err: ApiError = AppError::NotFound("Script x.sh not found".into()).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Script x.sh not found");

        let err: ApiError = AppError::InvalidName("bad".into()).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err: ApiError =
            AppError::Execution(ExecutionError::SpawnFailed("No such file".into())).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("No such file"));

        let err: ApiError = AppError::Domain(DomainError::ValidationError("x".into())).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
