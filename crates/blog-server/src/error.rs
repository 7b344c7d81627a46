//! API error types with JSON responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use blog_core::{IdParseError, ValidationError};
use blog_store::StoreError;
use serde::{Deserialize, Serialize};

/// Message returned for every unexpected failure. Details are only logged.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

/// API error that can be returned from handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Bad request (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Request body failed validation (400).
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Store error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl From<IdParseError> for ApiError {
    fn from(err: IdParseError) -> Self {
        Self::Validation(ValidationError::InvalidId(err))
    }
}

impl ApiError {
    /// Get the error code string for this error.
    pub fn code(&self) -> &'static str {
        match self.status_code() {
            StatusCode::BAD_REQUEST => "BAD_REQUEST",
            StatusCode::NOT_FOUND => "NOT_FOUND",
            _ => "INTERNAL_ERROR",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store(e) => match e {
                StoreError::AuthorNotFound(_) | StoreError::PostNotFound(_) => {
                    StatusCode::NOT_FOUND
                }
                StoreError::UserNameTaken(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Client-facing message. Internal failures never leak their cause.
    pub fn message(&self) -> String {
        match self {
            Self::BadRequest(m) | Self::NotFound(m) => m.clone(),
            Self::Validation(e) => e.to_string(),
            Self::Store(e) => match e {
                StoreError::AuthorNotFound(_) | StoreError::PostNotFound(_) => e.to_string(),
                StoreError::UserNameTaken(_) => "That username is already taken".to_string(),
                _ => GENERIC_ERROR_MESSAGE.to_string(),
            },
        }
    }
}

/// JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "NOT_FOUND", "BAD_REQUEST").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = %status, "Request rejected");
        }

        let body = ErrorResponse {
            code: self.code().to_string(),
            message: self.message(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
