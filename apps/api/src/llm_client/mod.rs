/// LLM Client: the single point of entry for all Gemini API calls.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// Callers depend on the `TextGenerator` trait, never on `GeminiClient`.
///
/// Model: gemini-2.0-flash (hardcoded, do not make configurable to prevent drift)
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

/// The model used for all generation calls.
pub const MODEL: &str = "gemini-2.0-flash";
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1/models";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const MAX_ATTEMPTS: u32 = 3;
const BACKOFF_BASE: Duration = Duration::from_secs(1);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("API still failing after {attempts} attempts (last status {status}): {body}")]
    RetriesExhausted {
        attempts: u32,
        status: u16,
        body: String,
    },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Anything that turns a prompt into the model's raw text reply.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

impl<'a> GenerateRequest<'a> {
    fn new(prompt: &'a str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// Decodes a generateContent response body and returns the first
/// candidate's first part, which must carry text.
pub fn first_text(body: &str) -> Result<String, LlmError> {
    let response: GenerateResponse = serde_json::from_str(body)?;
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content.parts.into_iter().next())
        .and_then(|p| p.text)
        .ok_or(LlmError::EmptyContent)
}

/// Only rate limiting and temporary unavailability are worth retrying.
pub fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::SERVICE_UNAVAILABLE
}

/// Delay before retrying after the given (1-based) failed attempt:
/// base, 2 * base, 4 * base...
pub fn backoff_delay(base: Duration, failed_attempt: u32) -> Duration {
    base * (1u32 << failed_attempt.saturating_sub(1).min(16))
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// Wraps the Gemini generateContent API with retry logic.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    endpoint: String,
    retry_base: Duration,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            api_key,
            endpoint: format!("{GEMINI_API_BASE}/{MODEL}:generateContent"),
            retry_base: BACKOFF_BASE,
        })
    }

    /// Makes the HTTP call, returning the raw response body.
    /// Retries on 429 and 503 with exponential backoff; everything else
    /// fails on the first attempt.
    async fn call(&self, prompt: &str) -> Result<String, LlmError> {
        let request_body = GenerateRequest::new(prompt);
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;

            let response = self
                .client
                .post(&self.endpoint)
                .header("x-goog-api-key", &self.api_key)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await?;

            let status = response.status();

            if is_retryable(status) {
                let body = response.text().await.unwrap_or_default();
                if attempt >= MAX_ATTEMPTS {
                    return Err(LlmError::RetriesExhausted {
                        attempts: attempt,
                        status: status.as_u16(),
                        body,
                    });
                }
                let delay = backoff_delay(self.retry_base, attempt);
                warn!(
                    "Gemini API returned {} on attempt {}, retrying after {}ms...",
                    status,
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
                continue;
            }

            let body = response.text().await?;

            if !status.is_success() {
                let message = serde_json::from_str::<GeminiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            debug!(
                "Gemini call succeeded on attempt {}: {} bytes",
                attempt,
                body.len()
            );
            return Ok(body);
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let body = self.call(prompt).await?;
        first_text(&body)
    }
}
