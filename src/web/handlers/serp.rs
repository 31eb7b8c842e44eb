//! SERP analysis endpoints

use super::{required, KeywordRequest};
use crate::web::error::ApiError;
use crate::web::extract::JsonBody;
use crate::web::state::AppState;
use axum::{extract::State, Json};
use serde_json::Value;

const KEYWORD_REQUIRED: &str = "Keyword is required";

pub async fn analysis(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<KeywordRequest>,
) -> Result<Json<Value>, ApiError> {
    let keyword = required(body.keyword, KEYWORD_REQUIRED)?;
    Ok(Json(state.provider.serp_data(&keyword, &body.options).await))
}

// TODO: extract featured snippets, knowledge graph and other feature blocks
// from the advanced SERP items instead of relaying the whole response.
pub async fn features(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<KeywordRequest>,
) -> Result<Json<Value>, ApiError> {
    let keyword = required(body.keyword, KEYWORD_REQUIRED)?;
    Ok(Json(state.provider.serp_features(&keyword, &body.options).await))
}

pub async fn local_pack(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<KeywordRequest>,
) -> Result<Json<Value>, ApiError> {
    let keyword = required(body.keyword, KEYWORD_REQUIRED)?;
    Ok(Json(state.provider.local_pack(&keyword, &body.options).await))
}
