//! AI keyword generation
//!
//! Generates related keyword ideas from a seed keyword using a
//! chat-completion service.

mod openai;

pub use openai::OpenAiKeywordGenerator;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use thiserror::Error;

/// Keywords requested when the caller does not say
pub const DEFAULT_KEYWORD_COUNT: usize = 20;

/// Upper bound on keywords per generation
pub const MAX_KEYWORD_COUNT: usize = 50;

/// Errors from a keyword generator
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Failed to reach completion service: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Completion service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Completion response was not valid JSON: {0}")]
    Malformed(String),

    #[error("Completion response did not contain a keyword list")]
    MissingKeywords,

    #[error("Completion service returned no keywords")]
    Empty,
}

/// Source of AI-generated keyword ideas
#[async_trait]
pub trait KeywordGenerator: Send + Sync {
    /// Generator name, for logging
    fn name(&self) -> &str;

    /// Generate up to `count` keywords related to `seed`
    async fn generate(
        &self,
        seed: &str,
        industry: Option<&str>,
        count: usize,
    ) -> Result<Vec<String>, CompletionError>;
}

/// Clamp a requested count into `1..=MAX_KEYWORD_COUNT`
pub fn keyword_count(requested: Option<usize>) -> usize {
    requested
        .unwrap_or(DEFAULT_KEYWORD_COUNT)
        .clamp(1, MAX_KEYWORD_COUNT)
}

static LIST_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:\d+[.)]|[-*•])\s*").expect("valid list marker pattern"));

/// Strip list markers and quotes, drop blanks and case-insensitive
/// duplicates, and keep at most `limit` entries.
pub fn normalize_keywords<I, S>(raw: I, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    raw.into_iter()
        .map(|k| {
            LIST_MARKER
                .replace(k.as_ref(), "")
                .trim()
                .trim_matches('"')
                .trim()
                .to_string()
        })
        .filter(|k| !k.is_empty())
        .filter(|k| seen.insert(k.to_lowercase()))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_count_bounds() {
        assert_eq!(keyword_count(None), DEFAULT_KEYWORD_COUNT);
        assert_eq!(keyword_count(Some(0)), 1);
        assert_eq!(keyword_count(Some(500)), MAX_KEYWORD_COUNT);
        assert_eq!(keyword_count(Some(12)), 12);
    }

    #[test]
    fn test_normalize_keywords() {
        let raw = vec![
            "1. trail running shoes",
            "- Trail Running Shoes",
            "  ",
            "\"waterproof running shoes\"",
            "2) running shoes for flat feet",
        ];
        assert_eq!(
            normalize_keywords(raw, 10),
            vec![
                "trail running shoes",
                "waterproof running shoes",
                "running shoes for flat feet"
            ]
        );
    }

    #[test]
    fn test_normalize_keywords_respects_limit() {
        let raw = ["a", "b", "c", "d"];
        assert_eq!(normalize_keywords(raw, 2), vec!["a", "b"]);
    }
}
