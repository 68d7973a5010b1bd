//! API error handling.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use workbee_core::Error;

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    Conflict(String),
    /// Free bookings are used up.
    #[error("{0}")]
    PaymentRequired(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::PaymentRequired(_) => StatusCode::PAYMENT_REQUIRED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let message = err.to_string();
        match err {
            Error::Validation(_) => ApiError::BadRequest(message),
            Error::InvalidCredentials | Error::Unauthorized(_) => ApiError::Unauthorized(message),
            Error::Forbidden(_) => ApiError::Forbidden(message),
            Error::NotFound(_) => ApiError::NotFound(message),
            Error::InvalidState { .. }
            | Error::WorkerBusy { .. }
            | Error::DuplicateKey { .. }
            | Error::AlreadyRegistered(_) => ApiError::Conflict(message),
            Error::QuotaExceeded { .. } => ApiError::PaymentRequired(message),
            Error::Internal(_) => ApiError::Internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use workbee_core::{JobId, JobStatus, WorkerId};

    #[test]
    fn test_status_mapping() {
        let cases = [
            (Error::Validation("x".into()), StatusCode::BAD_REQUEST),
            (Error::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (Error::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (Error::NotFound("x".into()), StatusCode::NOT_FOUND),
            (
                Error::InvalidState {
                    job: JobId::new(),
                    status: JobStatus::Completed,
                    operation: "cancel",
                },
                StatusCode::CONFLICT,
            ),
            (
                Error::WorkerBusy {
                    worker: WorkerId::new(),
                    job: JobId::new(),
                },
                StatusCode::CONFLICT,
            ),
            (
                Error::QuotaExceeded { used: 3, allowed: 3 },
                StatusCode::PAYMENT_REQUIRED,
            ),
            (Error::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }
}
