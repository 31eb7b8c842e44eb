//! Keyword research endpoints

use super::{required, KeywordRequest, KeywordsRequest};
use crate::completion::keyword_count;
use crate::provider::QueryOptions;
use crate::web::error::ApiError;
use crate::web::extract::JsonBody;
use crate::web::state::AppState;
use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

const KEYWORD_REQUIRED: &str = "Keyword is required";
const KEYWORDS_REQUIRED: &str = "Keywords are required";

pub async fn search_volume(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<KeywordsRequest>,
) -> Result<Json<Value>, ApiError> {
    let keywords = required(body.keywords, KEYWORDS_REQUIRED)?;
    Ok(Json(state.provider.search_volume(&keywords, &body.options).await))
}

pub async fn suggestions(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<KeywordRequest>,
) -> Result<Json<Value>, ApiError> {
    let keyword = required(body.keyword, KEYWORD_REQUIRED)?;
    Ok(Json(state.provider.keyword_suggestions(&keyword, &body.options).await))
}

pub async fn ideas(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<KeywordRequest>,
) -> Result<Json<Value>, ApiError> {
    let keyword = required(body.keyword, KEYWORD_REQUIRED)?;
    Ok(Json(state.provider.keyword_ideas(&keyword, &body.options).await))
}

pub async fn overview(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<KeywordsRequest>,
) -> Result<Json<Value>, ApiError> {
    let keywords = required(body.keywords, KEYWORDS_REQUIRED)?;
    Ok(Json(state.provider.keyword_overview(&keywords, &body.options).await))
}

pub async fn difficulty(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<KeywordsRequest>,
) -> Result<Json<Value>, ApiError> {
    let keywords = required(body.keywords, KEYWORDS_REQUIRED)?;
    Ok(Json(state.provider.keyword_difficulty(&keywords, &body.options).await))
}

/// Search volume and difficulty for the same keywords in one response
pub async fn analyze(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<KeywordsRequest>,
) -> Result<Json<Value>, ApiError> {
    let keywords = required(body.keywords, KEYWORDS_REQUIRED)?;
    let (search_volume, difficulty) = tokio::join!(
        state.provider.search_volume(&keywords, &body.options),
        state.provider.keyword_difficulty(&keywords, &body.options),
    );
    Ok(Json(json!({
        "search_volume": search_volume,
        "difficulty": difficulty,
    })))
}

pub async fn related(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<KeywordRequest>,
) -> Result<Json<Value>, ApiError> {
    let keyword = required(body.keyword, KEYWORD_REQUIRED)?;
    Ok(Json(state.provider.related_keywords(&keyword, &body.options).await))
}

pub async fn questions(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<KeywordRequest>,
) -> Result<Json<Value>, ApiError> {
    let keyword = required(body.keyword, KEYWORD_REQUIRED)?;
    Ok(Json(state.provider.keyword_questions(&keyword, &body.options).await))
}

pub async fn long_tail(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<KeywordRequest>,
) -> Result<Json<Value>, ApiError> {
    let keyword = required(body.keyword, KEYWORD_REQUIRED)?;
    Ok(Json(state.provider.long_tail_keywords(&keyword, &body.options).await))
}

/// Body for AI keyword suggestions
#[derive(Debug, Deserialize)]
pub struct AiSuggestionRequest {
    pub keyword: Option<String>,
    pub industry: Option<String>,
    /// Number of keywords to generate
    pub count: Option<usize>,
    #[serde(flatten)]
    pub options: QueryOptions,
}

/// Generate related keywords with the completion service, then attach their
/// search metrics from the keyword overview.
pub async fn ai_suggestions(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<AiSuggestionRequest>,
) -> Result<Json<Value>, ApiError> {
    let keyword = required(body.keyword, KEYWORD_REQUIRED)?;
    let industry = body.industry.filter(|i| !i.trim().is_empty());

    let generator = state.keywords.as_ref().ok_or_else(|| {
        ApiError::NotConfigured(
            "AI keyword suggestions are unavailable: OPENAI_API_KEY is not configured".to_string(),
        )
    })?;

    let suggestions = generator
        .generate(&keyword, industry.as_deref(), keyword_count(body.count))
        .await?;
    info!(
        "{} generated {} keywords for '{}'",
        generator.name(),
        suggestions.len(),
        keyword
    );

    let metrics = state
        .provider
        .keyword_overview(&suggestions, &body.options)
        .await;

    Ok(Json(json!({
        "keyword": keyword,
        "industry": industry,
        "suggestions": suggestions,
        "metrics": metrics,
    })))
}
