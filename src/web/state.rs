//! Application state shared across handlers

use crate::completion::{KeywordGenerator, OpenAiKeywordGenerator};
use crate::config::Settings;
use crate::network::HttpClient;
use crate::provider::ProviderClient;
use std::sync::Arc;
use tracing::warn;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Transport, reused for ad hoc provider clients
    pub http: HttpClient,
    /// Provider client built from the configured credentials
    pub provider: Arc<ProviderClient>,
    /// AI keyword generator, absent without a completion API key
    pub keywords: Option<Arc<dyn KeywordGenerator>>,
}

impl AppState {
    /// Create new application state. Fails when the provider credentials are
    /// missing.
    pub fn new(settings: Settings, http: HttpClient) -> anyhow::Result<Self> {
        let provider = ProviderClient::new(http.clone(), &settings.provider, None)?;

        let keywords = OpenAiKeywordGenerator::from_settings(http.clone(), &settings.completion)
            .map(|g| Arc::new(g) as Arc<dyn KeywordGenerator>);
        if keywords.is_none() {
            warn!("OPENAI_API_KEY not set; AI keyword suggestions are disabled");
        }

        Ok(Self::from_parts(settings, http, provider, keywords))
    }

    /// Assemble state from already-built components
    pub fn from_parts(
        settings: Settings,
        http: HttpClient,
        provider: ProviderClient,
        keywords: Option<Arc<dyn KeywordGenerator>>,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            http,
            provider: Arc::new(provider),
            keywords,
        }
    }

    /// Service name reported by status endpoints
    pub fn service_name(&self) -> &str {
        &self.settings.general.service_name
    }
}
