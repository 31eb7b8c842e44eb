//! Route definitions

use super::handlers::{competitor_analysis, domain_analytics, keyword_research, serp, status};
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status routes
        .route("/", get(status::root))
        .route("/health", get(status::health))
        .route("/ping", get(status::ping))
        .route("/api/status", get(status::status))
        .route("/api/health", get(status::api_health))
        .route("/api/test-connection", post(status::test_connection))
        // Feature groups
        .nest("/api/keyword-research", keyword_research_routes())
        .nest("/api/domain-analytics", domain_analytics_routes())
        .nest("/api/competitor-analysis", competitor_analysis_routes())
        .nest("/api/serp", serp_routes())
        // Add middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Add state
        .with_state(state)
}

fn keyword_research_routes() -> Router<AppState> {
    Router::new()
        .route("/search-volume", post(keyword_research::search_volume))
        .route("/suggestions", post(keyword_research::suggestions))
        .route("/ideas", post(keyword_research::ideas))
        .route("/overview", post(keyword_research::overview))
        .route("/difficulty", post(keyword_research::difficulty))
        .route("/analyze", post(keyword_research::analyze))
        .route("/related", post(keyword_research::related))
        .route("/questions", post(keyword_research::questions))
        .route("/long-tail", post(keyword_research::long_tail))
        .route("/ai-suggestions", post(keyword_research::ai_suggestions))
}

fn domain_analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/overview", post(domain_analytics::overview))
        .route("/backlinks", post(domain_analytics::backlinks))
        .route("/traffic", post(domain_analytics::traffic))
        .route("/keywords", post(domain_analytics::keywords))
        .route("/competitors", post(domain_analytics::competitors))
}

fn competitor_analysis_routes() -> Router<AppState> {
    Router::new()
        .route("/competitors", post(competitor_analysis::competitors))
        .route("/gap-analysis", post(competitor_analysis::gap_analysis))
        .route("/common-keywords", post(competitor_analysis::common_keywords))
        .route(
            "/competitor-backlinks",
            post(competitor_analysis::competitor_backlinks),
        )
        .route(
            "/domain-comparison",
            post(competitor_analysis::domain_comparison),
        )
        .route("/keyword-overlap", post(competitor_analysis::keyword_overlap))
}

fn serp_routes() -> Router<AppState> {
    Router::new()
        .route("/analysis", post(serp::analysis))
        .route("/features", post(serp::features))
        .route("/local-pack", post(serp::local_pack))
}
