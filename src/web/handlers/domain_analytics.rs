//! Domain analytics endpoints

use super::{required, DomainRequest, TargetRequest};
use crate::web::error::ApiError;
use crate::web::extract::JsonBody;
use crate::web::state::AppState;
use axum::{extract::State, Json};
use serde_json::Value;

const DOMAIN_REQUIRED: &str = "Domain is required";

pub async fn overview(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<DomainRequest>,
) -> Result<Json<Value>, ApiError> {
    let domain = required(body.domain, DOMAIN_REQUIRED)?;
    Ok(Json(state.provider.domain_analytics(&domain, &body.options).await))
}

pub async fn backlinks(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<TargetRequest>,
) -> Result<Json<Value>, ApiError> {
    let target = required(body.target, "Target domain/URL is required")?;
    Ok(Json(state.provider.backlinks(&target, &body.options).await))
}

pub async fn traffic(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<DomainRequest>,
) -> Result<Json<Value>, ApiError> {
    let domain = required(body.domain, DOMAIN_REQUIRED)?;
    Ok(Json(state.provider.traffic_analytics(&domain, &body.options).await))
}

/// Keywords the domain ranks for
pub async fn keywords(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<DomainRequest>,
) -> Result<Json<Value>, ApiError> {
    let domain = required(body.domain, DOMAIN_REQUIRED)?;
    Ok(Json(state.provider.ranked_keywords(&domain, &body.options).await))
}

pub async fn competitors(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<DomainRequest>,
) -> Result<Json<Value>, ApiError> {
    let domain = required(body.domain, DOMAIN_REQUIRED)?;
    Ok(Json(state.provider.competitors(&domain, &body.options).await))
}
