//! Gemini client for text generation.
//!
//! Talks to the `generateContent` REST endpoint directly and extracts the
//! first candidate's text.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

/// Base URL for the Generative Language API
const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Default timeout for generation requests; summaries can take a while
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("request to Gemini failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Gemini API returned HTTP {status}: {message}")]
    Api { status: u16, message: String },
    #[error("Gemini response contained no text")]
    EmptyResponse,
}

/// Anything that can turn a prompt into generated text.
///
/// The summarizer talks to this trait so tests can substitute a stub.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Generates a text completion for the prompt.
    async fn generate(&self, prompt: &str) -> Result<String, AgentError>;
}

/// Gemini REST client
pub struct GeminiClient {
    http: Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    /// Create a client for the given API key and model identifier.
    pub fn new(api_key: String, model: String) -> Result<Self, AgentError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            api_key,
            model,
        })
    }
}

#[async_trait]
impl GenerationProvider for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, AgentError> {
        let url = format!("{}/{}:generateContent", API_BASE, self.model);
        let body = json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }]
        });

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AgentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: GenerateResponse = response.json().await?;
        extract_text(envelope).ok_or(AgentError::EmptyResponse)
    }
}

/// Response envelope for `generateContent`.
///
/// Only the fields needed to reach the generated text are modelled.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Pull the text out of the first candidate, joining multi-part answers.
fn extract_text(envelope: GenerateResponse) -> Option<String> {
    let candidate = envelope.candidates?.into_iter().next()?;
    let parts = candidate.content?.parts?;

    let text = parts
        .into_iter()
        .filter_map(|part| part.text)
        .collect::<Vec<_>>()
        .join("");

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_single_part_text() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "Hello"}]}}
            ]
        }"#;
        let envelope: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(extract_text(envelope).unwrap(), "Hello");
    }

    #[test]
    fn joins_multi_part_answers() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "Hel"}, {"text": "lo"}]}}
            ]
        }"#;
        let envelope: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(extract_text(envelope).unwrap(), "Hello");
    }

    #[test]
    fn missing_candidates_yield_nothing() {
        let envelope: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(extract_text(envelope).is_none());
    }

    #[test]
    fn empty_parts_yield_nothing() {
        let json = r#"{"candidates": [{"content": {"parts": []}}]}"#;
        let envelope: GenerateResponse = serde_json::from_str(json).unwrap();
        assert!(extract_text(envelope).is_none());
    }
}
