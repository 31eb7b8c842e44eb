//! Errors surfaced by request handlers

use crate::completion::CompletionError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// An error that ends a request before or instead of relaying a provider reply
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed input; nothing was sent upstream
    #[error("{0}")]
    Validation(String),

    /// A feature whose backing service is not configured
    #[error("{0}")]
    NotConfigured(String),

    /// Keyword generation failed
    #[error("{0}")]
    Completion(#[from] CompletionError),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Convert the error to an HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotConfigured(_) | Self::Completion(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Rejected request: {}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
