//! Status, health and credential check endpoints

use crate::provider::{ConnectionStatus, Credentials, ProviderClient};
use crate::web::error::ApiError;
use crate::web::extract::JsonBody;
use crate::web::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

/// Root handler
pub async fn root(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "message": state.service_name(),
        "status": "running",
        "version": crate::VERSION
    }))
}

/// API status handler
pub async fn status(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "online",
        "version": crate::VERSION,
        "service": state.service_name()
    }))
}

/// Health check handler for deployment platforms
pub async fn api_health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "message": format!("{} is running", state.service_name()),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Plain-text health check
pub async fn health() -> &'static str {
    "OK"
}

pub async fn ping() -> &'static str {
    "pong"
}

#[derive(Debug, Deserialize)]
pub struct ConnectionRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

fn connection_reply(status: StatusCode, success: bool, message: impl Into<String>) -> Response {
    let body = ConnectionStatus {
        success,
        message: message.into(),
    };
    (status, Json(body)).into_response()
}

/// Check a username/password pair against the provider without touching the
/// configured client.
pub async fn test_connection(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<ConnectionRequest>,
) -> Result<Response, ApiError> {
    let credentials = match (body.username, body.password) {
        (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => {
            Credentials::new(user, pass)
        }
        _ => {
            return Ok(connection_reply(
                StatusCode::BAD_REQUEST,
                false,
                "Username and password are required",
            ))
        }
    };

    let client = match ProviderClient::new(
        state.http.clone(),
        &state.settings.provider,
        Some(credentials),
    ) {
        Ok(client) => client,
        Err(e) => {
            return Ok(connection_reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                false,
                e.to_string(),
            ))
        }
    };

    let result = client.test_connection().await;
    info!(
        "Connection test for {}: {}",
        client.credentials().username(),
        if result.success { "ok" } else { "failed" }
    );

    if result.success {
        Ok(connection_reply(StatusCode::OK, true, result.message))
    } else {
        Ok(connection_reply(StatusCode::UNAUTHORIZED, false, result.message))
    }
}
