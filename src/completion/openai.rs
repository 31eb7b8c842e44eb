//! Chat-completion backed keyword generator

use super::{normalize_keywords, CompletionError, KeywordGenerator};
use crate::config::CompletionSettings;
use crate::network::{ApiRequest, HttpClient};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

const SYSTEM_PROMPT: &str = "You are an SEO keyword research assistant. \
     Respond only with a JSON object of the form {\"keywords\": [\"...\"]} \
     containing search phrases real users would type.";

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: Option<String>,
}

/// Keyword generator using an OpenAI-compatible chat-completion API in JSON mode
pub struct OpenAiKeywordGenerator {
    http: HttpClient,
    api_key: String,
    endpoint: String,
    model: String,
    temperature: f32,
}

impl OpenAiKeywordGenerator {
    /// Returns `None` when no API key is configured
    pub fn from_settings(http: HttpClient, settings: &CompletionSettings) -> Option<Self> {
        let api_key = settings.api_key.clone().filter(|k| !k.trim().is_empty())?;
        Some(Self {
            http,
            api_key,
            endpoint: format!("{}/chat/completions", settings.base_url.trim_end_matches('/')),
            model: settings.model.clone(),
            temperature: settings.temperature,
        })
    }

    fn user_prompt(seed: &str, industry: Option<&str>, count: usize) -> String {
        let industry = industry
            .map(|i| format!(" in the {} industry", i))
            .unwrap_or_default();
        format!(
            "Generate {} keyword ideas semantically related to \"{}\"{}. \
             Mix short head terms, long-tail phrases and questions. \
             Return at most {} keywords.",
            count, seed, industry, count
        )
    }

    fn request_body(&self, seed: &str, industry: Option<&str>, count: usize) -> Value {
        json!({
            "model": self.model,
            "temperature": self.temperature,
            "response_format": {"type": "json_object"},
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": Self::user_prompt(seed, industry, count)},
            ],
        })
    }
}

/// Pull the keyword list out of a raw chat-completion response body
fn parse_keywords(body: &str, count: usize) -> Result<Vec<String>, CompletionError> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| CompletionError::Malformed(e.to_string()))?;

    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| CompletionError::Malformed("response has no message content".to_string()))?;

    let parsed: Value =
        serde_json::from_str(&content).map_err(|e| CompletionError::Malformed(e.to_string()))?;

    let list = parsed
        .get("keywords")
        .and_then(Value::as_array)
        .ok_or(CompletionError::MissingKeywords)?;

    let keywords = normalize_keywords(list.iter().filter_map(Value::as_str), count);
    if keywords.is_empty() {
        return Err(CompletionError::Empty);
    }
    Ok(keywords)
}

#[async_trait]
impl KeywordGenerator for OpenAiKeywordGenerator {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate(
        &self,
        seed: &str,
        industry: Option<&str>,
        count: usize,
    ) -> Result<Vec<String>, CompletionError> {
        let request = ApiRequest::post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(self.request_body(seed, industry, count));

        debug!("Requesting {} keyword ideas for '{}' from {}", count, seed, self.model);
        let response = self.http.execute(request).await?;

        if !response.is_success() {
            return Err(CompletionError::Status {
                status: response.status,
                body: response.text,
            });
        }

        parse_keywords(&response.text, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completion(content: &str) -> String {
        json!({"choices": [{"message": {"role": "assistant", "content": content}}]}).to_string()
    }

    #[test]
    fn test_parse_keywords() {
        let body = completion(r#"{"keywords": ["trail running shoes", "best running shoes"]}"#);
        assert_eq!(
            parse_keywords(&body, 10).unwrap(),
            vec!["trail running shoes", "best running shoes"]
        );
    }

    #[test]
    fn test_parse_keywords_truncates() {
        let body = completion(r#"{"keywords": ["a", "b", "c"]}"#);
        assert_eq!(parse_keywords(&body, 2).unwrap().len(), 2);
    }

    #[test]
    fn test_non_json_content() {
        let body = completion("Sure! Here are some keywords: shoes, boots");
        assert!(matches!(parse_keywords(&body, 10), Err(CompletionError::Malformed(_))));
    }

    #[test]
    fn test_missing_keyword_list() {
        let body = completion(r#"{"ideas": ["shoes"]}"#);
        assert!(matches!(parse_keywords(&body, 10), Err(CompletionError::MissingKeywords)));
    }

    #[test]
    fn test_empty_keyword_list() {
        let body = completion(r#"{"keywords": []}"#);
        assert!(matches!(parse_keywords(&body, 10), Err(CompletionError::Empty)));

        let blanks = completion(r#"{"keywords": ["  ", ""]}"#);
        assert!(matches!(parse_keywords(&blanks, 10), Err(CompletionError::Empty)));
    }

    #[test]
    fn test_body_is_not_chat_response() {
        assert!(matches!(parse_keywords("<html>", 10), Err(CompletionError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_disabled_without_key() {
        let http = HttpClient::new().unwrap();
        let disabled =
            OpenAiKeywordGenerator::from_settings(http.clone(), &CompletionSettings::default());
        assert!(disabled.is_none());

        let settings = CompletionSettings {
            api_key: Some("sk-test".to_string()),
            base_url: "https://llm.example.com/v1/".to_string(),
            ..Default::default()
        };
        let generator = OpenAiKeywordGenerator::from_settings(http, &settings).unwrap();
        assert_eq!(generator.endpoint, "https://llm.example.com/v1/chat/completions");
    }

    #[tokio::test]
    async fn test_request_body_embeds_inputs() {
        let settings = CompletionSettings {
            api_key: Some("sk-test".to_string()),
            ..Default::default()
        };
        let generator =
            OpenAiKeywordGenerator::from_settings(HttpClient::new().unwrap(), &settings).unwrap();
        let body = generator.request_body("running shoes", Some("sportswear"), 15);

        assert_eq!(body["response_format"]["type"], "json_object");
        assert_eq!(body["messages"][0]["content"], SYSTEM_PROMPT);
        let prompt = body["messages"][1]["content"].as_str().unwrap();
        assert!(prompt.contains("running shoes"));
        assert!(prompt.contains("sportswear"));
        assert!(prompt.contains("15"));
    }
}
