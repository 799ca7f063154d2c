//! Domain error taxonomy and the single normalizing boundary.
//!
//! Handlers raise `ApiError` and return early with `?`; the `IntoResponse`
//! implementation maps each variant onto its HTTP status and the standard
//! `ApiResponse` error body. Store and upstream failures are logged
//! server-side and surface to the client as an opaque 500.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use thiserror::Error;

use crate::response::{ApiResponse, Empty};

#[derive(Debug, Error)]
pub enum ApiError {
    /// Validation or business-rule violation.
    #[error("{0}")]
    BadRequest(String),
    /// Missing, malformed, or expired credential.
    #[error("{0}")]
    Unauthenticated(String),
    /// Role or ownership violation.
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    /// Store failure; detail is logged, never echoed to the client.
    #[error(transparent)]
    Db(#[from] DbErr),
    /// Local filesystem failure (upload storage).
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// External AI completion service failure.
    #[error("{0}")]
    Upstream(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
            ApiError::Unauthenticated(m) => (StatusCode::UNAUTHORIZED, m),
            ApiError::Forbidden(m) => (StatusCode::FORBIDDEN, m),
            ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m),
            ApiError::Db(e) => {
                tracing::error!(error = %e, "Database error while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::Io(e) => {
                tracing::error!(error = %e, "Storage error while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::Upstream(m) => {
                tracing::error!(error = %m, "AI service request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "AI service request failed".to_string(),
                )
            }
        };

        (status, Json(ApiResponse::<Empty>::error(message))).into_response()
    }
}
