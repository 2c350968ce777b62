//! Client seam for the hosted LLM that writes the study notes.
//!
//! The notes generator only needs "prompt in, text out". [`SummarizationClient`] captures that
//! contract; [`GeminiSummarizationClient`] implements it against the Gemini `generateContent`
//! REST endpoint. Every failure (unreachable host, error status, undecodable body, empty reply)
//! surfaces as a [`SummarizationClientError`] so the HTTP layer can answer with an upstream error
//! instead of empty notes.

use crate::config::Config;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced while asking the provider for a completion.
#[derive(Debug, Error)]
pub enum SummarizationClientError {
    /// Provider could not be reached or does not expose the endpoint.
    #[error("Summarization provider unavailable: {0}")]
    ProviderUnavailable(String),
    /// Provider returned an error response.
    #[error("Failed to generate notes: {0}")]
    GenerationFailed(String),
    /// Provider response could not be used.
    #[error("Malformed provider response: {0}")]
    InvalidResponse(String),
}

/// Interface implemented by completion providers.
#[async_trait]
pub trait SummarizationClient: Send + Sync {
    /// Send `prompt` to the model and return its reply text.
    async fn generate(&self, prompt: &str) -> Result<String, SummarizationClientError>;
}

/// Gemini `generateContent` client. The inner `reqwest::Client` pools connections across
/// requests; nothing else is shared.
pub struct GeminiSummarizationClient {
    http: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiSummarizationClient {
    /// Build a client from the startup configuration.
    pub fn from_config(config: &Config) -> Result<Self, SummarizationClientError> {
        let http = Client::builder()
            .user_agent("scholars-lens/notes")
            .build()
            .map_err(|error| {
                SummarizationClientError::ProviderUnavailable(format!(
                    "failed to construct HTTP client: {error}"
                ))
            })?;
        Ok(Self {
            http,
            base_url: config.gemini_base_url.clone(),
            model: config.gemini_model.clone(),
            api_key: config.gemini_api_key.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default, rename = "promptFeedback")]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default, rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PromptFeedback {
    #[serde(default, rename = "blockReason")]
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    fn into_text(self) -> Result<String, SummarizationClientError> {
        let Some(candidate) = self.candidates.into_iter().next() else {
            let reason = self
                .prompt_feedback
                .and_then(|feedback| feedback.block_reason)
                .unwrap_or_else(|| "no candidates returned".to_string());
            return Err(SummarizationClientError::InvalidResponse(format!(
                "Gemini returned no reply: {reason}"
            )));
        };

        let text: String = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            let reason = candidate.finish_reason.unwrap_or_else(|| "empty".into());
            return Err(SummarizationClientError::InvalidResponse(format!(
                "Gemini reply had no text (finish reason: {reason})"
            )));
        }
        Ok(text)
    }
}

#[async_trait]
impl SummarizationClient for GeminiSummarizationClient {
    async fn generate(&self, prompt: &str) -> Result<String, SummarizationClientError> {
        let payload = json!({
            "contents": [
                { "parts": [ { "text": prompt } ] }
            ]
        });

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|error| {
                SummarizationClientError::ProviderUnavailable(format!(
                    "failed to reach Gemini at {}: {error}",
                    self.base_url
                ))
            })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(SummarizationClientError::ProviderUnavailable(format!(
                "Gemini endpoint {} returned 404",
                self.endpoint()
            )));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizationClientError::GenerationFailed(format!(
                "Gemini returned {status}: {body}"
            )));
        }

        let body: GenerateContentResponse = response.json().await.map_err(|error| {
            SummarizationClientError::InvalidResponse(format!(
                "failed to decode Gemini response: {error}"
            ))
        })?;

        body.into_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method::POST, MockServer};

    const ENDPOINT: &str = "/v1beta/models/gemini-1.5-flash:generateContent";

    fn client_for(server: &MockServer) -> GeminiSummarizationClient {
        GeminiSummarizationClient::from_config(&Config::for_tests(&server.base_url()))
            .expect("client")
    }

    #[tokio::test]
    async fn gemini_client_joins_reply_parts() {
        let server = MockServer::start_async().await;
        let client = client_for(&server);

        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(ENDPOINT)
                    .header("x-goog-api-key", "test-key")
                    .json_body(json!({
                        "contents": [ { "parts": [ { "text": "Summarize" } ] } ]
                    }));
                then.status(200).json_body(json!({
                    "candidates": [{
                        "content": {
                            "role": "model",
                            "parts": [ { "text": "### Short Notes\n" }, { "text": "Body" } ]
                        },
                        "finishReason": "STOP"
                    }]
                }));
            })
            .await;

        let reply = client.generate("Summarize").await.expect("reply");

        mock.assert_async().await;
        assert_eq!(reply, "### Short Notes\nBody");
    }

    #[tokio::test]
    async fn gemini_client_handles_error_status() {
        let server = MockServer::start_async().await;
        let client = client_for(&server);

        server
            .mock_async(|when, then| {
                when.method(POST).path(ENDPOINT);
                then.status(500).body("boom");
            })
            .await;

        let error = client.generate("Summarize").await.expect_err("error response");

        assert!(
            matches!(error, SummarizationClientError::GenerationFailed(ref message) if message.contains("500")),
            "unexpected error: {error}"
        );
    }

    #[tokio::test]
    async fn gemini_client_rejects_blocked_prompt() {
        let server = MockServer::start_async().await;
        let client = client_for(&server);

        server
            .mock_async(|when, then| {
                when.method(POST).path(ENDPOINT);
                then.status(200).json_body(json!({
                    "promptFeedback": { "blockReason": "SAFETY" }
                }));
            })
            .await;

        let error = client.generate("Summarize").await.expect_err("blocked");

        assert!(
            matches!(error, SummarizationClientError::InvalidResponse(ref message) if message.contains("SAFETY")),
            "unexpected error: {error}"
        );
    }

    #[tokio::test]
    async fn gemini_client_rejects_blank_reply() {
        let server = MockServer::start_async().await;
        let client = client_for(&server);

        server
            .mock_async(|when, then| {
                when.method(POST).path(ENDPOINT);
                then.status(200).json_body(json!({
                    "candidates": [{
                        "content": { "parts": [ { "text": "  \n" } ] },
                        "finishReason": "MAX_TOKENS"
                    }]
                }));
            })
            .await;

        let error = client.generate("Summarize").await.expect_err("blank");

        assert!(matches!(error, SummarizationClientError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn gemini_client_reports_unreachable_host() {
        let config = Config::for_tests("http://127.0.0.1:1");
        let client = GeminiSummarizationClient::from_config(&config).expect("client");

        let error = client.generate("Summarize").await.expect_err("unreachable");

        assert!(matches!(error, SummarizationClientError::ProviderUnavailable(_)));
    }
}
