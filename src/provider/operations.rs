//! Provider operations
//!
//! Each operation maps its inputs to a fixed endpoint and one task object of
//! the provider's batch convention. Defaults for omitted options are applied
//! here and nowhere else.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_LOCATION: &str = "United States";
pub const DEFAULT_LANGUAGE: &str = "English";
pub const DEFAULT_TARGET_TYPE: &str = "domain";

/// Leading interrogative words
pub const QUESTION_PATTERN: &str =
    "^(what|how|why|when|where|who|which|can|is|are|do|does|will|would|could|should).*";

/// At least three whitespace-separated tokens
pub const LONG_TAIL_PATTERN: &str = r"^\S+\s+\S+\s+\S+.*";

/// Field the keyword filters apply to
pub const KEYWORD_FIELD: &str = "keyword_data.keyword";

/// Provider endpoint paths, relative to the versioned base URL
pub mod endpoints {
    pub const USER_DATA: &str = "appendix/user_data";
    pub const SEARCH_VOLUME: &str = "keywords_data/google/search_volume/live";
    pub const KEYWORD_SUGGESTIONS: &str = "dataforseo_labs/google/keyword_suggestions/live";
    pub const KEYWORD_IDEAS: &str = "dataforseo_labs/google/keyword_ideas/live";
    pub const KEYWORD_OVERVIEW: &str = "dataforseo_labs/google/keyword_overview/live";
    pub const KEYWORD_DIFFICULTY: &str = "dataforseo_labs/google/bulk_keyword_difficulty/live";
    pub const RELATED_KEYWORDS: &str = "dataforseo_labs/google/related_keywords/live";
    pub const SERP_REGULAR: &str = "serp/google/organic/live/regular";
    pub const SERP_ADVANCED: &str = "serp/google/organic/live/advanced";
    pub const DOMAIN_RANK_OVERVIEW: &str = "dataforseo_labs/google/domain_rank_overview/live";
    pub const COMPETITORS_DOMAIN: &str = "dataforseo_labs/google/competitors_domain/live";
    pub const BACKLINKS_OVERVIEW: &str = "backlinks/overview/live";
    pub const TRAFFIC_OVERVIEW: &str = "traffic_analytics/google/overview/live";
    pub const DOMAIN_INTERSECTION: &str = "dataforseo_labs/google/domain_intersection/live";
    pub const RANKED_KEYWORDS: &str = "dataforseo_labs/google/ranked_keywords/live";
}

/// Optional query settings accepted by every operation.
///
/// Operations read only the fields they use. Values are forwarded to the
/// provider as given; only absent (or `null`) fields fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryOptions {
    pub location: Option<Value>,
    pub language: Option<Value>,
    pub limit: Option<Value>,
    pub depth: Option<Value>,
    pub target_type: Option<Value>,
}

impl QueryOptions {
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(Value::from(limit));
        self
    }

    fn location_name(&self) -> Value {
        or_default(&self.location, DEFAULT_LOCATION)
    }

    fn language_name(&self) -> Value {
        or_default(&self.language, DEFAULT_LANGUAGE)
    }

    fn limit_or(&self, default: u32) -> Value {
        or_default(&self.limit, default)
    }

    fn depth_or(&self, default: u32) -> Value {
        or_default(&self.depth, default)
    }
}

fn or_default(value: &Option<Value>, default: impl Into<Value>) -> Value {
    value.clone().unwrap_or_else(|| default.into())
}

/// A `[field, operator, value]` provider filter
pub type Filter = [&'static str; 3];

/// One task object of a provider call
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProviderTask {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_type: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<Vec<Filter>>,
}

/// An endpoint paired with the task to send to it
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRequest {
    pub endpoint: &'static str,
    pub task: ProviderTask,
}

impl TaskRequest {
    fn new(endpoint: &'static str, task: ProviderTask) -> Self {
        Self { endpoint, task }
    }

    /// Request body: the task wrapped in a single-element list
    pub fn batch(&self) -> [&ProviderTask; 1] {
        [&self.task]
    }
}

fn keyword_list_task(keywords: &[String], opts: &QueryOptions) -> ProviderTask {
    ProviderTask {
        keywords: Some(keywords.to_vec()),
        location_name: Some(opts.location_name()),
        language_name: Some(opts.language_name()),
        ..Default::default()
    }
}

fn ideas_task(keyword: &str, opts: &QueryOptions, default_limit: u32) -> ProviderTask {
    ProviderTask {
        keywords: Some(vec![keyword.to_string()]),
        location_name: Some(opts.location_name()),
        language_name: Some(opts.language_name()),
        limit: Some(opts.limit_or(default_limit)),
        ..Default::default()
    }
}

fn domain_task(domain: &str, opts: &QueryOptions, default_limit: u32) -> ProviderTask {
    ProviderTask {
        target: Some(domain.to_string()),
        location_name: Some(opts.location_name()),
        limit: Some(opts.limit_or(default_limit)),
        ..Default::default()
    }
}

fn serp_task(keyword: &str, opts: &QueryOptions, depth: Value) -> ProviderTask {
    ProviderTask {
        keyword: Some(keyword.to_string()),
        location_name: Some(opts.location_name()),
        language_name: Some(opts.language_name()),
        depth: Some(depth),
        ..Default::default()
    }
}

pub fn search_volume(keywords: &[String], opts: &QueryOptions) -> TaskRequest {
    TaskRequest::new(endpoints::SEARCH_VOLUME, keyword_list_task(keywords, opts))
}

/// Suggestions always request 100 rows; `opts.limit` is ignored.
pub fn keyword_suggestions(keyword: &str, opts: &QueryOptions) -> TaskRequest {
    let task = ProviderTask {
        keyword: Some(keyword.to_string()),
        location_name: Some(opts.location_name()),
        language_name: Some(opts.language_name()),
        limit: Some(Value::from(100)),
        ..Default::default()
    };
    TaskRequest::new(endpoints::KEYWORD_SUGGESTIONS, task)
}

pub fn keyword_ideas(keyword: &str, opts: &QueryOptions) -> TaskRequest {
    TaskRequest::new(endpoints::KEYWORD_IDEAS, ideas_task(keyword, opts, 100))
}

pub fn keyword_overview(keywords: &[String], opts: &QueryOptions) -> TaskRequest {
    TaskRequest::new(endpoints::KEYWORD_OVERVIEW, keyword_list_task(keywords, opts))
}

pub fn keyword_difficulty(keywords: &[String], opts: &QueryOptions) -> TaskRequest {
    TaskRequest::new(endpoints::KEYWORD_DIFFICULTY, keyword_list_task(keywords, opts))
}

pub fn related_keywords(keyword: &str, opts: &QueryOptions) -> TaskRequest {
    let task = ProviderTask {
        keyword: Some(keyword.to_string()),
        location_name: Some(opts.location_name()),
        language_name: Some(opts.language_name()),
        limit: Some(opts.limit_or(50)),
        ..Default::default()
    };
    TaskRequest::new(endpoints::RELATED_KEYWORDS, task)
}

/// Keyword ideas starting with an interrogative word
pub fn keyword_questions(keyword: &str, opts: &QueryOptions) -> TaskRequest {
    let mut task = ideas_task(keyword, opts, 50);
    task.filters = Some(vec![[KEYWORD_FIELD, "regex", QUESTION_PATTERN]]);
    TaskRequest::new(endpoints::KEYWORD_IDEAS, task)
}

/// Keyword ideas of three or more words
pub fn long_tail_keywords(keyword: &str, opts: &QueryOptions) -> TaskRequest {
    let mut task = ideas_task(keyword, opts, 50);
    task.filters = Some(vec![[KEYWORD_FIELD, "regex", LONG_TAIL_PATTERN]]);
    TaskRequest::new(endpoints::KEYWORD_IDEAS, task)
}

pub fn serp_data(keyword: &str, opts: &QueryOptions) -> TaskRequest {
    TaskRequest::new(endpoints::SERP_REGULAR, serp_task(keyword, opts, opts.depth_or(10)))
}

/// Advanced SERP with room for knowledge graph, snippets and other features.
/// The response is relayed as-is.
pub fn serp_features(keyword: &str, opts: &QueryOptions) -> TaskRequest {
    TaskRequest::new(endpoints::SERP_ADVANCED, serp_task(keyword, opts, Value::from(20)))
}

/// Regular SERP for local-pack inspection. Local results are not extracted;
/// the response is relayed as-is.
pub fn local_pack(keyword: &str, opts: &QueryOptions) -> TaskRequest {
    TaskRequest::new(endpoints::SERP_REGULAR, serp_task(keyword, opts, Value::from(10)))
}

pub fn domain_analytics(domain: &str, opts: &QueryOptions) -> TaskRequest {
    TaskRequest::new(endpoints::DOMAIN_RANK_OVERVIEW, domain_task(domain, opts, 10))
}

pub fn competitors(domain: &str, opts: &QueryOptions) -> TaskRequest {
    TaskRequest::new(endpoints::COMPETITORS_DOMAIN, domain_task(domain, opts, 10))
}

pub fn backlinks(target: &str, opts: &QueryOptions) -> TaskRequest {
    let task = ProviderTask {
        target: Some(target.to_string()),
        limit: Some(opts.limit_or(10)),
        target_type: Some(or_default(&opts.target_type, DEFAULT_TARGET_TYPE)),
        ..Default::default()
    };
    TaskRequest::new(endpoints::BACKLINKS_OVERVIEW, task)
}

pub fn traffic_analytics(domain: &str, opts: &QueryOptions) -> TaskRequest {
    let task = ProviderTask {
        target: Some(domain.to_string()),
        location_name: Some(opts.location_name()),
        ..Default::default()
    };
    TaskRequest::new(endpoints::TRAFFIC_OVERVIEW, task)
}

/// Keywords both domains rank for
pub fn domain_intersection(domain1: &str, domain2: &str, opts: &QueryOptions) -> TaskRequest {
    let task = ProviderTask {
        target1: Some(domain1.to_string()),
        target2: Some(domain2.to_string()),
        location_name: Some(opts.location_name()),
        limit: Some(opts.limit_or(100)),
        ..Default::default()
    };
    TaskRequest::new(endpoints::DOMAIN_INTERSECTION, task)
}

pub fn ranked_keywords(domain: &str, opts: &QueryOptions) -> TaskRequest {
    TaskRequest::new(endpoints::RANKED_KEYWORDS, domain_task(domain, opts, 100))
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;
    use serde_json::json;

    fn body(request: &TaskRequest) -> Value {
        serde_json::to_value(request.batch()).unwrap()
    }

    fn keywords(list: &[&str]) -> Vec<String> {
        list.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_search_volume_defaults() {
        let request = search_volume(&keywords(&["seo", "sem"]), &QueryOptions::default());
        assert_eq!(request.endpoint, "keywords_data/google/search_volume/live");
        assert_eq!(
            body(&request),
            json!([{
                "keywords": ["seo", "sem"],
                "location_name": "United States",
                "language_name": "English"
            }])
        );
    }

    #[test]
    fn test_suggestions_limit_is_fixed() {
        let opts = QueryOptions::default().with_limit(5);
        let request = keyword_suggestions("coffee", &opts);
        assert_eq!(body(&request)[0]["limit"], 100);
        assert_eq!(body(&request)[0]["keyword"], "coffee");
    }

    #[test]
    fn test_keyword_ideas_wraps_seed_in_list() {
        let request = keyword_ideas("coffee", &QueryOptions::default());
        assert_eq!(request.endpoint, endpoints::KEYWORD_IDEAS);
        assert_eq!(
            body(&request),
            json!([{
                "keywords": ["coffee"],
                "location_name": "United States",
                "language_name": "English",
                "limit": 100
            }])
        );
    }

    #[test]
    fn test_caller_options_override_defaults() {
        let opts = QueryOptions {
            location: Some(json!("Germany")),
            language: Some(json!("German")),
            limit: Some(json!(7)),
            ..Default::default()
        };
        let task = body(&related_keywords("kaffee", &opts));
        assert_eq!(task[0]["location_name"], "Germany");
        assert_eq!(task[0]["language_name"], "German");
        assert_eq!(task[0]["limit"], 7);
    }

    #[test]
    fn test_related_keywords_default_limit() {
        let request = related_keywords("coffee", &QueryOptions::default());
        assert_eq!(request.endpoint, endpoints::RELATED_KEYWORDS);
        assert_eq!(body(&request)[0]["limit"], 50);
    }

    #[test]
    fn test_question_filter() {
        let request = keyword_questions("coffee", &QueryOptions::default());
        assert_eq!(request.endpoint, endpoints::KEYWORD_IDEAS);
        assert_eq!(
            body(&request)[0]["filters"],
            json!([[
                "keyword_data.keyword",
                "regex",
                "^(what|how|why|when|where|who|which|can|is|are|do|does|will|would|could|should).*"
            ]])
        );
        assert_eq!(body(&request)[0]["limit"], 50);
    }

    #[test]
    fn test_long_tail_filter() {
        let request = long_tail_keywords("running shoes", &QueryOptions::default());
        assert_eq!(
            body(&request)[0]["filters"],
            json!([["keyword_data.keyword", "regex", "^\\S+\\s+\\S+\\s+\\S+.*"]])
        );
        assert_eq!(body(&request)[0]["keywords"], json!(["running shoes"]));
        assert_eq!(body(&request)[0]["limit"], 50);
    }

    #[test]
    fn test_filter_patterns_match_intended_phrases() {
        let questions = Regex::new(QUESTION_PATTERN).unwrap();
        assert!(questions.is_match("how to brew coffee"));
        assert!(questions.is_match("should i buy a grinder"));
        assert!(!questions.is_match("best coffee grinder"));

        let long_tail = Regex::new(LONG_TAIL_PATTERN).unwrap();
        assert!(long_tail.is_match("best running shoes"));
        assert!(long_tail.is_match("best trail running shoes"));
        assert!(!long_tail.is_match("running shoes"));
    }

    #[test]
    fn test_serp_variants() {
        let opts = QueryOptions::default();
        let regular = serp_data("pizza", &opts);
        assert_eq!(regular.endpoint, endpoints::SERP_REGULAR);
        assert_eq!(body(&regular)[0]["depth"], 10);

        let deeper = serp_data("pizza", &QueryOptions { depth: Some(json!(30)), ..Default::default() });
        assert_eq!(body(&deeper)[0]["depth"], 30);

        let features = serp_features("pizza", &opts);
        assert_eq!(features.endpoint, endpoints::SERP_ADVANCED);
        assert_eq!(body(&features)[0]["depth"], 20);

        let local = local_pack("pizza near me", &opts);
        assert_eq!(local.endpoint, endpoints::SERP_REGULAR);
        assert_eq!(body(&local)[0]["depth"], 10);
    }

    #[test]
    fn test_domain_operations() {
        let opts = QueryOptions::default();
        assert_eq!(
            body(&domain_analytics("example.com", &opts)),
            json!([{"target": "example.com", "location_name": "United States", "limit": 10}])
        );
        assert_eq!(competitors("example.com", &opts).endpoint, endpoints::COMPETITORS_DOMAIN);
        assert_eq!(body(&competitors("example.com", &opts))[0]["limit"], 10);
        assert_eq!(body(&ranked_keywords("example.com", &opts))[0]["limit"], 100);
        assert_eq!(
            body(&traffic_analytics("example.com", &opts)),
            json!([{"target": "example.com", "location_name": "United States"}])
        );
    }

    #[test]
    fn test_backlinks_defaults() {
        let request = backlinks("example.com", &QueryOptions::default());
        assert_eq!(request.endpoint, "backlinks/overview/live");
        assert_eq!(
            body(&request),
            json!([{"target": "example.com", "limit": 10, "target_type": "domain"}])
        );

        let url = backlinks(
            "https://example.com/page",
            &QueryOptions { target_type: Some(json!("url")), ..Default::default() },
        );
        assert_eq!(body(&url)[0]["target_type"], "url");
    }

    #[test]
    fn test_domain_intersection() {
        let request = domain_intersection("a.com", "b.com", &QueryOptions::default());
        assert_eq!(request.endpoint, endpoints::DOMAIN_INTERSECTION);
        assert_eq!(
            body(&request),
            json!([{
                "target1": "a.com",
                "target2": "b.com",
                "location_name": "United States",
                "limit": 100
            }])
        );
    }

    #[test]
    fn test_query_options_deserialize_partial() {
        let opts: QueryOptions = serde_json::from_value(json!({"limit": 25})).unwrap();
        assert_eq!(opts.limit, Some(json!(25)));
        assert!(opts.location.is_none());
    }

    #[test]
    fn test_caller_values_forwarded_verbatim() {
        let opts: QueryOptions = serde_json::from_value(json!({
            "limit": "50",
            "depth": -3,
            "location": 2840,
            "target_type": null
        }))
        .unwrap();
        assert!(opts.target_type.is_none());

        let ideas = body(&long_tail_keywords("running shoes", &opts));
        assert_eq!(ideas[0]["limit"], json!("50"));
        assert_eq!(ideas[0]["location_name"], json!(2840));

        let serp = body(&serp_data("pizza", &opts));
        assert_eq!(serp[0]["depth"], json!(-3));

        let links = body(&backlinks("example.com", &opts));
        assert_eq!(links[0]["target_type"], "domain");
    }
}
