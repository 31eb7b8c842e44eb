//! Competitor analysis endpoints

use super::{
    distinct_domains, per_domain, required, DomainPairRequest, DomainRequest, DomainsRequest,
};
use crate::provider::QueryOptions;
use crate::web::error::ApiError;
use crate::web::extract::JsonBody;
use crate::web::state::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};

const BOTH_DOMAINS_REQUIRED: &str = "Both domains are required";

/// Rows of ranked keywords fetched per domain when looking for common keywords
pub const COMMON_KEYWORDS_LIMIT: u32 = 1000;

fn domain_pair(
    domain1: Option<String>,
    domain2: Option<String>,
) -> Result<(String, String), ApiError> {
    Ok((
        required(domain1, BOTH_DOMAINS_REQUIRED)?,
        required(domain2, BOTH_DOMAINS_REQUIRED)?,
    ))
}

pub async fn competitors(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<DomainRequest>,
) -> Result<Json<Value>, ApiError> {
    let domain = required(body.domain, "Domain is required")?;
    Ok(Json(state.provider.competitors(&domain, &body.options).await))
}

/// Keyword gap between two domains, answered by a single intersection call
pub async fn gap_analysis(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<DomainPairRequest>,
) -> Result<Json<Value>, ApiError> {
    let (domain1, domain2) = domain_pair(body.domain1, body.domain2)?;
    Ok(Json(
        state
            .provider
            .domain_intersection(&domain1, &domain2, &body.options)
            .await,
    ))
}

/// Ranked keywords for every domain, keyed by domain
pub async fn common_keywords(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<DomainsRequest>,
) -> Result<Json<Value>, ApiError> {
    let domains = distinct_domains(body.domains);
    if domains.len() < 2 {
        return Err(ApiError::validation("At least two domains are required"));
    }

    let options = body.options.with_limit(COMMON_KEYWORDS_LIMIT);
    let results = per_domain(&domains, |domain| {
        state.provider.ranked_keywords(domain, &options)
    })
    .await;

    Ok(Json(json!({ "domains": results })))
}

/// Backlink overview for every domain, keyed by domain
pub async fn competitor_backlinks(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<DomainsRequest>,
) -> Result<Json<Value>, ApiError> {
    let domains = distinct_domains(body.domains);
    if domains.is_empty() {
        return Err(ApiError::validation("At least one domain is required"));
    }

    let options = body.options;
    let results = per_domain(&domains, |domain| state.provider.backlinks(domain, &options)).await;

    Ok(Json(json!({ "domains": results })))
}

/// Domain overview for both domains side by side, always at the overview's
/// default row limit
pub async fn domain_comparison(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<DomainPairRequest>,
) -> Result<Json<Value>, ApiError> {
    let (domain1, domain2) = domain_pair(body.domain1, body.domain2)?;
    let options = QueryOptions {
        limit: None,
        ..body.options
    };
    let (first, second) = tokio::join!(
        state.provider.domain_analytics(&domain1, &options),
        state.provider.domain_analytics(&domain2, &options),
    );
    Ok(Json(json!({
        "domain1": first,
        "domain2": second,
    })))
}

/// Keywords both domains rank for
pub async fn keyword_overlap(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<DomainPairRequest>,
) -> Result<Json<Value>, ApiError> {
    let (domain1, domain2) = domain_pair(body.domain1, body.domain2)?;
    Ok(Json(
        state
            .provider
            .domain_intersection(&domain1, &domain2, &body.options)
            .await,
    ))
}
