// Gemini `generateContent` client.
//
// One POST per call, authenticated with a single credential. Any transport
// failure, non-2xx status, or unreadable body comes back as a
// `GenerationError`; deciding what to do about it is the dispatcher's job.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use preamble_core::config::LlmConfig;

use crate::credentials::Credential;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

// ---------------------------------------------------------------------------
// Backend seam
// ---------------------------------------------------------------------------

/// The external generation call: `(credential, prompt) -> text`.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Provider name used in source labels, e.g. "Gemini".
    fn provider_name(&self) -> &str;

    async fn generate(&self, credential: &Credential, prompt: &str)
        -> Result<String, GenerationError>;
}

// ---------------------------------------------------------------------------
// Request body
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

impl<'a> GenerateRequest<'a> {
    fn new(prompt: &'a str) -> Self {
        GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
        }
    }
}

// ---------------------------------------------------------------------------
// GeminiClient
// ---------------------------------------------------------------------------

pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    provider: String,
}

impl GeminiClient {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        provider: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, GenerationError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(GeminiClient {
            http: builder.build()?,
            base_url: base_url.into(),
            model: model.into(),
            provider: provider.into(),
        })
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, GenerationError> {
        Self::new(
            config.base_url.clone(),
            config.model.clone(),
            config.provider.clone(),
            config.timeout_secs.map(Duration::from_secs),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl GenerationBackend for GeminiClient {
    fn provider_name(&self) -> &str {
        &self.provider
    }

    async fn generate(
        &self,
        credential: &Credential,
        prompt: &str,
    ) -> Result<String, GenerationError> {
        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", credential.expose())
            .json(&GenerateRequest::new(prompt))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(%status, bytes = body.len(), model = %self.model, "generateContent response");

        if !status.is_success() {
            return Err(GenerationError::Status {
                status,
                body: extract_error_message(&body).unwrap_or(body),
            });
        }

        let value: Value = serde_json::from_str(&body)
            .map_err(|e| GenerationError::InvalidResponse(format!("not JSON: {e}")))?;

        extract_text(&value)
            .ok_or_else(|| GenerationError::InvalidResponse("no candidate text".to_string()))
    }
}

// ---------------------------------------------------------------------------
// JSON parsing helpers
// ---------------------------------------------------------------------------

/// Concatenate `candidates[0].content.parts[*].text`.
///
/// Expected shape: `{ "candidates": [ { "content": { "parts": [ { "text": "..." } ] } } ] }`
pub(crate) fn extract_text(v: &Value) -> Option<String> {
    let parts = v
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;
    let texts: Vec<&str> = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(Value::as_str))
        .collect();
    if texts.is_empty() {
        return None;
    }
    Some(texts.concat())
}

/// Pull `error.message` out of an error body, if it has one.
fn extract_error_message(body: &str) -> Option<String> {
    let v: Value = serde_json::from_str(body).ok()?;
    v.get("error")?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
