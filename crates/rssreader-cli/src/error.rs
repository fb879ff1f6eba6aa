//! Errors reported to clients.

use super::*;

use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

/// Everything a request can fail with.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed or out-of-range request input.
    #[error("{0}")]
    Validation(String),
    /// Fetching, merging, or filtering failed.
    #[error(transparent)]
    Internal(#[from] feeds::Error),
    /// The response could not be encoded.
    #[error(transparent)]
    Encoding(#[from] serde_json::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Encoding(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn status_text(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "Invalid request",
            ApiError::Internal(_) => "Internal server error",
            ApiError::Encoding(_) => "Error rendering response",
        }
    }
}

/// Body of an error response.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ErrorResponse {
    /// User-level status message.
    pub status: String,
    /// Application-level error message, for debugging.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            status: self.status_text().to_string(),
            error: self.to_string(),
        };
        let body = match serde_json::to_string(&body) {
            Ok(body) => body,
            Err(e) => {
                tracing::error!("Failed to encode error response: {e}");
                String::new()
            }
        };
        (self.status_code(), HeaderMap::json_headers(), body).into_response()
    }
}
