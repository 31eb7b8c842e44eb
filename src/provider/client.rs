//! DataForSEO API client

use super::credentials::Credentials;
use super::error::ClientError;
use super::operations::{self, endpoints, QueryOptions, TaskRequest};
use crate::config::ProviderSettings;
use crate::network::{ApiRequest, ApiResponse, HttpClient};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

const MISSING_CREDENTIALS: &str = "DataForSEO credentials must be provided either as parameters \
     or environment variables (DATAFORSEO_USERNAME, DATAFORSEO_PASSWORD)";

/// Outcome of a connectivity probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    pub success: bool,
    pub message: String,
}

impl ConnectionStatus {
    fn ok() -> Self {
        Self {
            success: true,
            message: "Connection successful".to_string(),
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Authenticated client for the search-data provider.
///
/// Holds only immutable configuration, so one instance can serve every
/// request concurrently.
#[derive(Clone)]
pub struct ProviderClient {
    http: HttpClient,
    base_url: String,
    credentials: Credentials,
}

impl ProviderClient {
    /// Create a client. Explicit `credentials` win over the configured ones.
    pub fn new(
        http: HttpClient,
        settings: &ProviderSettings,
        credentials: Option<Credentials>,
    ) -> Result<Self, ClientError> {
        let credentials = credentials
            .filter(Credentials::is_complete)
            .or_else(|| Credentials::from_settings(settings))
            .ok_or_else(|| ClientError::Config(MISSING_CREDENTIALS.to_string()))?;

        Url::parse(&settings.base_url).map_err(|e| {
            ClientError::Config(format!(
                "Invalid provider base URL '{}': {}",
                settings.base_url, e
            ))
        })?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    fn authorized(&self, request: ApiRequest) -> ApiRequest {
        request
            .header("Authorization", self.credentials.basic_auth())
            .header("Content-Type", "application/json")
    }

    /// Probe the provider with the current credentials. Never fails; the
    /// outcome is reported in the returned status.
    pub async fn test_connection(&self) -> ConnectionStatus {
        let request = self.authorized(ApiRequest::get(self.url(endpoints::USER_DATA)));

        match self.http.execute(request).await {
            Ok(response) if response.status == 200 => ConnectionStatus::ok(),
            Ok(response) => {
                warn!(
                    "Provider connection test for {} returned {}",
                    self.credentials.username(),
                    response.status
                );
                ConnectionStatus::failed(format!(
                    "API returned status code {}: {}",
                    response.status, response.text
                ))
            }
            Err(e) => {
                warn!("Provider connection test failed: {}", e);
                ConnectionStatus::failed(e.to_string())
            }
        }
    }

    /// POST `payload` to `endpoint` and parse the JSON reply, keeping the
    /// failure kind.
    pub async fn try_request<P>(&self, endpoint: &str, payload: &P) -> Result<Value, ClientError>
    where
        P: Serialize + ?Sized,
    {
        let body = serde_json::to_value(payload)?;
        let request = self.authorized(ApiRequest::post(self.url(endpoint)).json(body));

        debug!("Provider request: {}", endpoint);
        let response = self.http.execute(request).await?;

        if !response.is_success() {
            return Err(status_error(&response));
        }

        Ok(response.json()?)
    }

    /// POST `payload` to `endpoint`. Failures come back as a
    /// `{"status_code", "status_message"}` object instead of an error.
    pub async fn make_request<P>(&self, endpoint: &str, payload: &P) -> Value
    where
        P: Serialize + ?Sized,
    {
        match self.try_request(endpoint, payload).await {
            Ok(value) => value,
            Err(e) => {
                warn!("Provider request to {} failed: {}", endpoint, e);
                e.to_status_body()
            }
        }
    }

    /// Send a prepared operation
    pub async fn send(&self, request: TaskRequest) -> Value {
        self.make_request(request.endpoint, &request.batch()).await
    }

    pub async fn search_volume(&self, keywords: &[String], opts: &QueryOptions) -> Value {
        self.send(operations::search_volume(keywords, opts)).await
    }

    pub async fn keyword_suggestions(&self, keyword: &str, opts: &QueryOptions) -> Value {
        self.send(operations::keyword_suggestions(keyword, opts)).await
    }

    pub async fn keyword_ideas(&self, keyword: &str, opts: &QueryOptions) -> Value {
        self.send(operations::keyword_ideas(keyword, opts)).await
    }

    pub async fn keyword_overview(&self, keywords: &[String], opts: &QueryOptions) -> Value {
        self.send(operations::keyword_overview(keywords, opts)).await
    }

    pub async fn keyword_difficulty(&self, keywords: &[String], opts: &QueryOptions) -> Value {
        self.send(operations::keyword_difficulty(keywords, opts)).await
    }

    pub async fn related_keywords(&self, keyword: &str, opts: &QueryOptions) -> Value {
        self.send(operations::related_keywords(keyword, opts)).await
    }

    pub async fn keyword_questions(&self, keyword: &str, opts: &QueryOptions) -> Value {
        self.send(operations::keyword_questions(keyword, opts)).await
    }

    pub async fn long_tail_keywords(&self, keyword: &str, opts: &QueryOptions) -> Value {
        self.send(operations::long_tail_keywords(keyword, opts)).await
    }

    pub async fn serp_data(&self, keyword: &str, opts: &QueryOptions) -> Value {
        self.send(operations::serp_data(keyword, opts)).await
    }

    pub async fn serp_features(&self, keyword: &str, opts: &QueryOptions) -> Value {
        self.send(operations::serp_features(keyword, opts)).await
    }

    pub async fn local_pack(&self, keyword: &str, opts: &QueryOptions) -> Value {
        self.send(operations::local_pack(keyword, opts)).await
    }

    pub async fn domain_analytics(&self, domain: &str, opts: &QueryOptions) -> Value {
        self.send(operations::domain_analytics(domain, opts)).await
    }

    pub async fn competitors(&self, domain: &str, opts: &QueryOptions) -> Value {
        self.send(operations::competitors(domain, opts)).await
    }

    pub async fn backlinks(&self, target: &str, opts: &QueryOptions) -> Value {
        self.send(operations::backlinks(target, opts)).await
    }

    pub async fn traffic_analytics(&self, domain: &str, opts: &QueryOptions) -> Value {
        self.send(operations::traffic_analytics(domain, opts)).await
    }

    pub async fn domain_intersection(
        &self,
        domain1: &str,
        domain2: &str,
        opts: &QueryOptions,
    ) -> Value {
        self.send(operations::domain_intersection(domain1, domain2, opts))
            .await
    }

    pub async fn ranked_keywords(&self, domain: &str, opts: &QueryOptions) -> Value {
        self.send(operations::ranked_keywords(domain, opts)).await
    }
}

/// Build a status error, preferring the provider's own code and message
fn status_error(response: &ApiResponse) -> ClientError {
    let body: Option<Value> = response.json().ok();
    let field = |name: &str| body.as_ref().and_then(|b| b.get(name)).cloned();

    ClientError::Status {
        status_code: field("status_code")
            .and_then(|v| v.as_u64())
            .unwrap_or(response.status as u64),
        message: field("status_message")
            .and_then(|v| v.as_str().map(String::from))
            .unwrap_or_else(|| response.text.clone()),
    }
}
