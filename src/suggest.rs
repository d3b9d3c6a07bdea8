//! Subtask suggestion client
//!
//! Turns a task's title and description into a list of proposed subtasks via
//! the Gemini generative-language API. The request asks for a JSON response
//! constrained to `{ "subtasks": [string, ...] }`; the raw text may still
//! arrive wrapped in a markdown code fence, which is stripped before parsing.
//!
//! Failure policy: a response that parses as JSON but has the wrong shape
//! degrades softly into a single fixed fallback line shown as content. A
//! network failure, API error, empty response, or unparsable body surfaces as
//! one fixed user-facing message; the underlying cause is only logged.
//! No retries, no caching.

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::config::SuggestConfig;
use crate::error::{Error as KbError, Result};

/// Shown as a suggestion line when the API answers with parseable JSON of
/// the wrong shape.
pub const FALLBACK_MESSAGE: &str = "Could not parse the suggestions. Please try again.";

/// The only message a failed suggestion request surfaces to the user.
pub const UNAVAILABLE_MESSAGE: &str =
    "Failed to generate subtasks. Please check your API key and network connection.";

const NO_DESCRIPTION: &str = "No description provided.";

/// Internal failure detail, logged but never shown to the user
#[derive(Error, Debug)]
enum SuggestFailure {
    #[error("API key is not configured")]
    MissingApiKey,

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("received an empty response from the API")]
    EmptyResponse,

    #[error("response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Client for the subtask suggestion API
#[derive(Debug, Clone)]
pub struct SuggestionClient {
    http: Client,
    model: String,
    base_url: String,
    api_key: Option<String>,
}

impl SuggestionClient {
    /// Build a client from configuration.
    ///
    /// A missing API key does not fail here; it surfaces as a suggestion
    /// failure when a request is actually made.
    pub fn new(config: &SuggestConfig) -> Self {
        Self {
            http: Client::new(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key(),
        }
    }

    /// Whether an API key was available at startup
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Request subtask suggestions for a task.
    ///
    /// Returns the suggested subtasks in API order, duplicates and the empty
    /// list included. Any hard failure maps to [`UNAVAILABLE_MESSAGE`].
    pub async fn generate_subtasks(&self, title: &str, description: &str) -> Result<Vec<String>> {
        match self.request(title, description).await {
            Ok(subtasks) => Ok(subtasks),
            Err(failure) => {
                tracing::warn!(error = %failure, "subtask suggestion failed");
                Err(KbError::Suggestion(UNAVAILABLE_MESSAGE.to_string()))
            }
        }
    }

    async fn request(
        &self,
        title: &str,
        description: &str,
    ) -> std::result::Result<Vec<String>, SuggestFailure> {
        let api_key = self.api_key.as_deref().ok_or(SuggestFailure::MissingApiKey)?;
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = request_body(&build_prompt(title, description));

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SuggestFailure::Api {
                status: status.as_u16(),
                message,
            });
        }

        let api_response: GenerateContentResponse = response.json().await?;
        parse_subtasks(&api_response.text())
    }
}

/// Natural-language prompt embedding the task's text
fn build_prompt(title: &str, description: &str) -> String {
    let description = if description.trim().is_empty() {
        NO_DESCRIPTION
    } else {
        description
    };
    format!(
        "Based on the following task, break it down into a list of smaller, actionable subtasks.\n\
         \n\
         Task Title: \"{title}\"\n\
         Task Description: \"{description}\"\n\
         \n\
         Provide the subtasks as a simple list of strings."
    )
}

/// Request body with the constrained JSON output schema
fn request_body(prompt: &str) -> serde_json::Value {
    json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "subtasks": {
                        "type": "ARRAY",
                        "items": {
                            "type": "STRING",
                            "description": "A single, actionable subtask."
                        }
                    }
                }
            }
        }
    })
}

/// Parse the raw response text into subtasks.
///
/// Wrong-shape-but-parseable JSON yields the fallback message as content
/// rather than an error.
fn parse_subtasks(raw: &str) -> std::result::Result<Vec<String>, SuggestFailure> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SuggestFailure::EmptyResponse);
    }

    let cleaned = strip_code_fence(trimmed);
    let value: serde_json::Value = serde_json::from_str(cleaned)?;

    let subtasks = value
        .get("subtasks")
        .and_then(|field| field.as_array())
        .and_then(|items| {
            items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<String>>>()
        });

    match subtasks {
        Some(subtasks) => Ok(subtasks),
        None => Ok(vec![FALLBACK_MESSAGE.to_string()]),
    }
}

/// Strip a wrapping markdown code fence (with optional language tag)
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

// Gemini API response types

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts
    fn text(&self) -> String {
        let mut out = String::new();
        if let Some(content) = self.candidates.first().and_then(|c| c.content.as_ref()) {
            for part in &content.parts {
                if let Some(text) = &part.text {
                    out.push_str(text);
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_with(base_url: &str, api_key: Option<&str>) -> SuggestionClient {
        SuggestionClient {
            http: Client::new(),
            model: "gemini-3-flash-preview".to_string(),
            base_url: base_url.to_string(),
            api_key: api_key.map(str::to_string),
        }
    }

    #[test]
    fn parses_fenced_json_response() {
        let raw = "```json\n{\"subtasks\":[\"Book flight\",\"Book hotel\"]}\n```";
        let subtasks = parse_subtasks(raw).unwrap();
        assert_eq!(subtasks, vec!["Book flight", "Book hotel"]);
    }

    #[test]
    fn parses_unfenced_json_response() {
        let raw = "{\"subtasks\":[\"One\"]}";
        assert_eq!(parse_subtasks(raw).unwrap(), vec!["One"]);
    }

    #[test]
    fn fence_without_language_tag_is_stripped() {
        let raw = "```\n{\"subtasks\":[]}\n```";
        assert_eq!(parse_subtasks(raw).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn wrong_shape_returns_fallback_message_not_error() {
        let raw = "{\"notsubtasks\":[]}";
        assert_eq!(parse_subtasks(raw).unwrap(), vec![FALLBACK_MESSAGE]);
    }

    #[test]
    fn non_string_elements_count_as_wrong_shape() {
        let raw = "{\"subtasks\":[\"ok\", 42]}";
        assert_eq!(parse_subtasks(raw).unwrap(), vec![FALLBACK_MESSAGE]);
    }

    #[test]
    fn empty_subtasks_array_is_returned_verbatim() {
        let raw = "{\"subtasks\":[]}";
        assert_eq!(parse_subtasks(raw).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn duplicates_are_preserved() {
        let raw = "{\"subtasks\":[\"Do it\",\"Do it\"]}";
        assert_eq!(parse_subtasks(raw).unwrap(), vec!["Do it", "Do it"]);
    }

    #[test]
    fn empty_response_is_a_failure() {
        assert!(matches!(
            parse_subtasks("   \n"),
            Err(SuggestFailure::EmptyResponse)
        ));
    }

    #[test]
    fn non_json_response_is_a_failure() {
        assert!(matches!(
            parse_subtasks("here are your subtasks: fly, sleep"),
            Err(SuggestFailure::Json(_))
        ));
    }

    #[test]
    fn prompt_substitutes_sentinel_for_empty_description() {
        let prompt = build_prompt("Plan trip", "  ");
        assert!(prompt.contains("Task Title: \"Plan trip\""));
        assert!(prompt.contains("No description provided."));
    }

    #[test]
    fn prompt_embeds_given_description() {
        let prompt = build_prompt("Plan trip", "two weeks in May");
        assert!(prompt.contains("two weeks in May"));
        assert!(!prompt.contains("No description provided."));
    }

    #[test]
    fn request_body_constrains_output_schema() {
        let body = request_body("prompt");
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(
            body["generationConfig"]["responseSchema"]["properties"]["subtasks"]["type"],
            "ARRAY"
        );
    }

    #[tokio::test]
    async fn network_failure_maps_to_fixed_message() {
        // Nothing listens on this port; the connection fails immediately.
        let client = client_with("http://127.0.0.1:9", Some("test-key"));
        let err = client.generate_subtasks("Plan trip", "").await.unwrap_err();
        match err {
            KbError::Suggestion(message) => assert_eq!(message, UNAVAILABLE_MESSAGE),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_api_key_maps_to_fixed_message() {
        let client = client_with("http://127.0.0.1:9", None);
        let err = client.generate_subtasks("Plan trip", "").await.unwrap_err();
        match err {
            KbError::Suggestion(message) => assert_eq!(message, UNAVAILABLE_MESSAGE),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn response_text_joins_first_candidate_parts() {
        let json = r#"{
            "candidates": [{
                "content": { "parts": [{ "text": "{\"subtasks\":" }, { "text": "[\"a\"]}" }] }
            }]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), "{\"subtasks\":[\"a\"]}");
    }
}
