//! HTTP API errors
//!
//! Error types for the transport layer. Status mapping: validation
//! failures and malformed bodies are 400s, everything else a 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::service::PackError;

/// HTTP API errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body could not be parsed
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// A pack service error (validation or persistence)
    #[error("{0}")]
    Pack(#[from] PackError),
}

impl ApiError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Pack(err) if err.is_validation() => StatusCode::BAD_REQUEST,
            ApiError::Pack(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(&self));
        (status, body).into_response()
    }
}
