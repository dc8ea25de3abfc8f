//! Gemini HTTP client for the three pipeline calls (name extraction,
//! name normalization, detail lookup) plus image-grounded extraction.
//!
//! A safety-filter refusal is its own error variant so callers can degrade
//! the affected fields to the `Blocked` sentinel instead of `Error`.

use base64::Engine as _;
use serde_json::Value;
use thiserror::Error;

const GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Request timeout. Detail lookups routinely take tens of seconds.
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Error, Debug, Clone)]
pub enum LlmError {
    #[error("Request blocked by safety filter: {0}")]
    Blocked(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Gemini returned error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),
}

/// LLM completion abstraction (allows mocking)
pub trait LlmClient {
    /// One text-only completion.
    fn generate(&self, prompt: &str) -> Result<String, LlmError>;

    /// One completion grounded in an inline image (vision OCR path).
    fn generate_with_image(
        &self,
        prompt: &str,
        image_bytes: &[u8],
        mime_type: &str,
    ) -> Result<String, LlmError>;
}

/// Production client for the Google Generative Language API.
pub struct GeminiClient {
    http: reqwest::blocking::Client,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(model: &str, api_key: &str) -> Self {
        let http = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            model: model.to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn request(&self, parts: Vec<Value>) -> Result<String, LlmError> {
        let endpoint = format!(
            "{GEMINI_ENDPOINT}/{}:generateContent?key={}",
            self.model, self.api_key
        );
        let payload = serde_json::json!({
            "contents": [
                {
                    "role": "user",
                    "parts": parts
                }
            ],
            "generationConfig": {
                "temperature": 0.2
            }
        });

        let response = self
            .http
            .post(endpoint)
            .json(&payload)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Http(format!("Request timed out after {REQUEST_TIMEOUT_SECS}s"))
                } else {
                    LlmError::Http(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response
            .json()
            .map_err(|e| LlmError::ResponseParsing(e.to_string()))?;

        parse_generate_response(&body)
    }
}

impl LlmClient for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.request(vec![serde_json::json!({ "text": prompt })])
    }

    fn generate_with_image(
        &self,
        prompt: &str,
        image_bytes: &[u8],
        mime_type: &str,
    ) -> Result<String, LlmError> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(image_bytes);
        self.request(vec![
            serde_json::json!({ "text": prompt }),
            serde_json::json!({
                "inline_data": {
                    "mime_type": mime_type,
                    "data": encoded
                }
            }),
        ])
    }
}

/// Pull the completion text out of a generateContent response body,
/// surfacing a safety block as `LlmError::Blocked`.
fn parse_generate_response(body: &Value) -> Result<String, LlmError> {
    if let Some(reason) = body
        .get("promptFeedback")
        .and_then(|fb| fb.get("blockReason"))
        .and_then(Value::as_str)
    {
        return Err(LlmError::Blocked(reason.to_string()));
    }

    body.get("candidates")
        .and_then(Value::as_array)
        .and_then(|items| items.first())
        .and_then(|item| item.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(Value::as_array)
        .and_then(|parts| parts.first())
        .and_then(|part| part.get("text"))
        .and_then(Value::as_str)
        .map(ToString::to_string)
        .ok_or_else(|| LlmError::ResponseParsing("missing text candidate".to_string()))
}

// ──────────────────────────────────────────────
// Mock client
// ──────────────────────────────────────────────

/// Mock LLM client for testing — replays scripted outcomes in order and
/// records every prompt it receives.
#[derive(Default)]
pub struct MockLlmClient {
    outcomes: std::sync::Mutex<std::collections::VecDeque<Result<String, LlmError>>>,
    prompts: std::sync::Mutex<Vec<String>>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(self, response: &str) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(Ok(response.to_string()));
        self
    }

    pub fn push_blocked(self, reason: &str) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(Err(LlmError::Blocked(reason.to_string())));
        self
    }

    pub fn push_error(self, error: LlmError) -> Self {
        self.outcomes.lock().unwrap().push_back(Err(error));
        self
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    fn next(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::Http("mock: no scripted response".to_string())))
    }
}

impl LlmClient for MockLlmClient {
    fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.next(prompt)
    }

    fn generate_with_image(
        &self,
        prompt: &str,
        _image_bytes: &[u8],
        _mime_type: &str,
    ) -> Result<String, LlmError> {
        self.next(prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_replays_outcomes_in_order() {
        let client = MockLlmClient::new()
            .push_response("first")
            .push_blocked("SAFETY");
        assert_eq!(client.generate("a").unwrap(), "first");
        assert!(matches!(client.generate("b"), Err(LlmError::Blocked(_))));
        assert_eq!(client.prompts(), vec!["a", "b"]);
    }

    #[test]
    fn mock_exhaustion_is_an_error_not_a_panic() {
        let client = MockLlmClient::new();
        assert!(matches!(client.generate("x"), Err(LlmError::Http(_))));
    }

    #[test]
    fn block_reason_surfaced_from_prompt_feedback() {
        let body = serde_json::json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        });
        match parse_generate_response(&body) {
            Err(LlmError::Blocked(reason)) => assert_eq!(reason, "SAFETY"),
            other => panic!("expected Blocked, got {other:?}"),
        }
    }

    #[test]
    fn candidate_text_extracted() {
        let body = serde_json::json!({
            "candidates": [
                { "content": { "parts": [ { "text": "Paracetamol" } ] } }
            ]
        });
        assert_eq!(parse_generate_response(&body).unwrap(), "Paracetamol");
    }

    #[test]
    fn missing_candidate_is_parse_error() {
        let body = serde_json::json!({ "candidates": [] });
        assert!(matches!(
            parse_generate_response(&body),
            Err(LlmError::ResponseParsing(_))
        ));
    }
}
