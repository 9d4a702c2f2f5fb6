//! Mapping of service failures onto HTTP responses
//!
//! | kind       | status |
//! |------------|--------|
//! | NotFound   | 404    |
//! | Conflict   | 409    |
//! | BadRequest | 400    |
//! | Internal   | 500    |
//!
//! The body is always `{"status", "error", "message"}`. Internal failures
//! are logged with their cause and answered with a generic message.

use crate::types::{AccountError, ErrorKind};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;

/// JSON body of every error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    pub error: String,
    pub message: String,
}

/// HTTP status for an error kind
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        let status = status_for(self.kind());
        let message = match self.kind() {
            ErrorKind::Internal => {
                error!(error = %self, "account operation failed");
                "internal server error".to_string()
            }
            _ => self.to_string(),
        };

        let body = ErrorBody {
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

/// Body that could not be read as the expected JSON payload
pub fn reject_body(rejection: JsonRejection) -> AccountError {
    AccountError::bad_request(rejection.body_text())
}

/// Path segment that could not be parsed (e.g. a non-numeric id)
pub fn reject_path(rejection: PathRejection) -> AccountError {
    AccountError::bad_request(rejection.body_text())
}
