//! API error responses
//!
//! Every failure leaves the handler as a JSON `{"error": "..."}` body with
//! a matching status code.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// JSON error body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// Handler error
#[derive(Debug)]
pub enum ApiError {
    /// Request validation failed (400)
    BadRequest(String),
    /// Messaging client unavailable (503)
    ServiceUnavailable(String),
    /// Anything unexpected (500); the message is exposed to the caller
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::ServiceUnavailable(msg)
            | ApiError::Internal(msg) => msg,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.message().to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<tgparse_core::Error> for ApiError {
    fn from(err: tgparse_core::Error) -> Self {
        match err {
            tgparse_core::Error::Validation(msg) => ApiError::BadRequest(msg),
            tgparse_core::Error::NotConnected(msg) => ApiError::ServiceUnavailable(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Internal(rejection.body_text())
    }
}
