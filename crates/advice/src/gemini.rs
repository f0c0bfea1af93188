//! Gemini `generateContent` client.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::AdviceError;
use crate::request::AdviceRequest;
use crate::service::AdviceService;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Gemini client configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: SecretString,
    pub model: String,
    pub timeout: Duration,
    /// Overrides the API base URL, mainly for pointing at a local stub.
    pub base_url: String,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            base_url: GEMINI_API_BASE.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Advice service backed by the Gemini API.
#[derive(Clone)]
pub struct GeminiAdviceService {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiAdviceService {
    /// Creates a new Gemini client.
    ///
    /// # Errors
    ///
    /// Returns [`AdviceError::MissingApiKey`] for a blank key, or an HTTP
    /// error if the client cannot be built.
    pub fn new(config: GeminiConfig) -> Result<Self, AdviceError> {
        if config.api_key.expose_secret().trim().is_empty() {
            return Err(AdviceError::MissingApiKey);
        }

        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    async fn handle_error_status(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> AdviceError {
        let message = match response.text().await {
            Ok(body) => serde_json::from_str::<ApiErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body),
            Err(e) => e.to_string(),
        };
        AdviceError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl AdviceService for GeminiAdviceService {
    #[instrument(skip(self, request), fields(model = %self.config.model))]
    async fn ask(&self, request: &AdviceRequest) -> Result<String, AdviceError> {
        let prompt = request.prompt();
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: &prompt }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", self.config.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_status(status, response).await);
        }

        let text = response.text().await?;
        let parsed: GenerateContentResponse = serde_json::from_str(&text)
            .map_err(|e| AdviceError::Parse(format!("Failed to parse response: {e}")))?;
        Ok(parsed.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_key_rejected() {
        assert!(matches!(
            GeminiAdviceService::new(GeminiConfig::new("  ")),
            Err(AdviceError::MissingApiKey)
        ));
    }

    #[test]
    fn test_endpoint() {
        let service = GeminiAdviceService::new(
            GeminiConfig::new("key").with_base_url("http://localhost:9000/"),
        )
        .unwrap();
        assert_eq!(
            service.endpoint(),
            "http://localhost:9000/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_request_serialization() {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: "hi" }],
            }],
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"contents": [{"parts": [{"text": "hi"}]}]})
        );
    }

    #[test]
    fn test_response_text_joins_parts() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "Try a "}, {"text": "banana smoothie."}], "role": "model"}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), "Try a banana smoothie.");
    }

    #[test]
    fn test_response_without_candidates_is_empty() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.text(), "");
    }

    #[test]
    fn test_api_error_deserialization() {
        let json = r#"{"error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}}"#;
        let response: ApiErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.error.message, "API key not valid.");
    }
}
