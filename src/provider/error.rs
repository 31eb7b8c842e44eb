//! Provider client errors

use serde_json::{json, Value};
use thiserror::Error;

/// Status code reported for failures that never produced a provider status
pub const INTERNAL_STATUS_CODE: u64 = 500;

/// Failure kinds of a provider call
#[derive(Debug, Error)]
pub enum ClientError {
    /// Missing credentials or an unusable base URL
    #[error("{0}")]
    Config(String),

    /// The request never produced a response
    #[error("Error making request: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-success status
    #[error("Provider returned status {status_code}: {message}")]
    Status { status_code: u64, message: String },

    /// The payload or the response body was not valid JSON
    #[error("Error decoding provider response: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    pub fn status_code(&self) -> u64 {
        match self {
            Self::Status { status_code, .. } => *status_code,
            _ => INTERNAL_STATUS_CODE,
        }
    }

    pub fn status_message(&self) -> String {
        match self {
            Self::Status { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Error object in the provider's own `status_code`/`status_message` shape
    pub fn to_status_body(&self) -> Value {
        json!({
            "status_code": self.status_code(),
            "status_message": self.status_message(),
        })
    }
}
