//! HTTP request handlers
//!
//! Handlers check that required fields are present and hand everything else
//! to the provider client untouched; operation defaults live in
//! [`crate::provider::operations`].

pub mod competitor_analysis;
pub mod domain_analytics;
pub mod keyword_research;
pub mod serp;
pub mod status;

use super::error::ApiError;
use crate::provider::QueryOptions;
use futures::future::join_all;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::future::Future;

/// Body carrying a single seed keyword
#[derive(Debug, Deserialize)]
pub struct KeywordRequest {
    pub keyword: Option<String>,
    #[serde(flatten)]
    pub options: QueryOptions,
}

/// Body carrying a keyword list
#[derive(Debug, Deserialize)]
pub struct KeywordsRequest {
    pub keywords: Option<Vec<String>>,
    #[serde(flatten)]
    pub options: QueryOptions,
}

/// Body carrying one domain
#[derive(Debug, Deserialize)]
pub struct DomainRequest {
    pub domain: Option<String>,
    #[serde(flatten)]
    pub options: QueryOptions,
}

/// Body carrying a backlink target (domain or URL)
#[derive(Debug, Deserialize)]
pub struct TargetRequest {
    pub target: Option<String>,
    #[serde(flatten)]
    pub options: QueryOptions,
}

/// Body carrying two domains to compare
#[derive(Debug, Deserialize)]
pub struct DomainPairRequest {
    pub domain1: Option<String>,
    pub domain2: Option<String>,
    #[serde(flatten)]
    pub options: QueryOptions,
}

/// Body carrying a list of domains
#[derive(Debug, Deserialize)]
pub struct DomainsRequest {
    pub domains: Option<Vec<String>>,
    #[serde(flatten)]
    pub options: QueryOptions,
}

/// Values that can be checked for presence
pub trait Present {
    fn is_present(&self) -> bool;
}

impl Present for String {
    fn is_present(&self) -> bool {
        !self.trim().is_empty()
    }
}

impl<T> Present for Vec<T> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

/// Unwrap a required field, rejecting absent and blank values with `message`
pub fn required<T: Present>(value: Option<T>, message: &str) -> Result<T, ApiError> {
    value
        .filter(Present::is_present)
        .ok_or_else(|| ApiError::validation(message))
}

/// Trimmed domains in first-seen order, without blanks or duplicates
pub fn distinct_domains(domains: Option<Vec<String>>) -> Vec<String> {
    let mut seen = HashSet::new();
    domains
        .unwrap_or_default()
        .into_iter()
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty() && seen.insert(d.clone()))
        .collect()
}

/// Run `call` once per domain, concurrently, and key each result by its
/// domain. A failed call only affects its own entry.
pub async fn per_domain<'a, F, Fut>(domains: &'a [String], call: F) -> Map<String, Value>
where
    F: Fn(&'a str) -> Fut,
    Fut: Future<Output = Value>,
{
    let results = join_all(domains.iter().map(|domain| call(domain.as_str()))).await;

    domains.iter().cloned().zip(results).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required() {
        assert_eq!(required(Some("seo".to_string()), "missing").unwrap(), "seo");
        assert!(required::<String>(None, "missing").is_err());
        assert!(required(Some("   ".to_string()), "missing").is_err());
        assert!(required::<Vec<String>>(Some(vec![]), "missing").is_err());
    }

    #[test]
    fn test_request_options_flatten() {
        let body: KeywordRequest = serde_json::from_value(json!({
            "keyword": "coffee",
            "location": "Canada",
            "limit": 5
        }))
        .unwrap();
        assert_eq!(body.keyword.as_deref(), Some("coffee"));
        assert_eq!(body.options.location, Some(json!("Canada")));
        assert_eq!(body.options.limit, Some(json!(5)));
        assert!(body.options.language.is_none());
    }

    #[test]
    fn test_distinct_domains() {
        let domains = distinct_domains(Some(vec![
            "a.com".to_string(),
            " b.com ".to_string(),
            "a.com".to_string(),
            " ".to_string(),
            String::new(),
        ]));
        assert_eq!(domains, vec!["a.com", "b.com"]);

        assert!(distinct_domains(Some(vec![" ".to_string(), String::new()])).is_empty());
        assert!(distinct_domains(None).is_empty());
    }

    #[tokio::test]
    async fn test_per_domain_one_entry_per_domain() {
        let domains = vec!["a.com".to_string(), "b.com".to_string()];
        let results = per_domain(&domains, |d| async move { json!({ "target": d }) }).await;

        assert_eq!(results.len(), 2);
        assert_eq!(results["a.com"], json!({"target": "a.com"}));
        assert_eq!(results["b.com"], json!({"target": "b.com"}));
    }
}
