//! Error handling for the HTTP layer
//!
//! Domain failures (unknown id, missing data) are answered with `200 OK` and a
//! bare JSON string describing the problem. Only unexpected failures use a
//! non-2xx status.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

/// Response envelope shared by every JSON handler
pub type ApiResult<T> = Result<Json<T>, AppError>;

/// Body of an internal error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub trace_id: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    #[error("not found: {message}")]
    NotFound { message: String },

    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Machine-readable code, used for logging
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound { .. } => "not_found",
            AppError::InvalidInput { .. } => "invalid_input",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Status code the error is rendered with
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } | AppError::InvalidInput { .. } => StatusCode::OK,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4();
        let status = self.status();
        let error_code = self.code();

        match self {
            AppError::NotFound { message } | AppError::InvalidInput { message } => {
                tracing::warn!(
                    error_id = %error_id,
                    error_code = %error_code,
                    %message,
                    "request rejected"
                );
                (status, Json(message)).into_response()
            }
            AppError::Internal(e) => {
                tracing::error!(
                    error_id = %error_id,
                    error_code = %error_code,
                    status_code = %status.as_u16(),
                    error = %e,
                    "request error"
                );

                // Hide internal details outside of debug builds
                let message = if cfg!(debug_assertions) {
                    e.to_string()
                } else {
                    "An internal server error occurred".to_string()
                };

                let body = ErrorEnvelope {
                    error: ErrorBody {
                        code: error_code.to_string(),
                        message,
                        trace_id: error_id.to_string(),
                        timestamp: OffsetDateTime::now_utc().to_string(),
                    },
                };

                (status, Json(body)).into_response()
            }
        }
    }
}
