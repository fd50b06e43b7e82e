//! Anthropic Messages API provider.
//!
//! Thin reqwest client over `POST /v1/messages`. Only text content blocks
//! are read from the response; anything else in the body is ignored.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::LlmError;
use crate::llm::provider::{
    ChatMessage, CompletionRequest, CompletionResponse, FinishReason, LlmProvider,
};

/// Default Anthropic API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.anthropic.com";

/// Anthropic API version header value.
const API_VERSION: &str = "2023-06-01";

/// Output cap used when the request doesn't set one (the API requires it).
const DEFAULT_MAX_TOKENS: u32 = 1024;

const PROVIDER: &str = "anthropic";

/// Anthropic LLM provider using the Messages API.
pub struct AnthropicProvider {
    client: Client,
    api_key: SecretString,
    api_base: String,
    model: String,
}

// ── Wire types ──────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    id: Option<String>,
    content: Vec<ContentBlock>,
    #[serde(default)]
    stop_reason: Option<String>,
    #[serde(default)]
    usage: ApiUsage,
}

#[derive(Debug, Default, Deserialize)]
struct ApiUsage {
    #[serde(default)]
    input_tokens: u32,
    #[serde(default)]
    output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(rename = "type")]
    error_type: String,
    message: String,
}

impl AnthropicProvider {
    /// Create a provider talking to the public Anthropic API.
    pub fn new(
        api_key: SecretString,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        Self::with_base_url(api_key, model, DEFAULT_API_BASE, timeout)
    }

    /// Create a provider with a custom base URL (used by tests).
    pub fn with_base_url(
        api_key: SecretString,
        model: impl Into<String>,
        api_base: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::RequestFailed {
                provider: PROVIDER.to_string(),
                reason: format!("Failed to build HTTP client: {e}"),
            })?;

        let api_base: String = api_base.into();
        Ok(Self {
            client,
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }

    fn parse_response(resp: MessagesResponse) -> Result<CompletionResponse, LlmError> {
        let texts: Vec<String> = resp
            .content
            .into_iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text),
                ContentBlock::Other => None,
            })
            .collect();

        if texts.is_empty() {
            return Err(LlmError::InvalidResponse {
                provider: PROVIDER.to_string(),
                reason: "response contained no text content".to_string(),
            });
        }

        let finish_reason = match resp.stop_reason.as_deref() {
            Some("end_turn") | Some("stop_sequence") => FinishReason::Stop,
            Some("max_tokens") => FinishReason::Length,
            _ => FinishReason::Unknown,
        };

        Ok(CompletionResponse {
            content: texts.join(""),
            input_tokens: resp.usage.input_tokens,
            output_tokens: resp.usage.output_tokens,
            finish_reason,
            response_id: resp.id,
        })
    }

    fn retry_after(headers: &reqwest::header::HeaderMap) -> Option<Duration> {
        headers
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            messages: &request.messages,
        };

        let url = format!("{}/v1/messages", self.api_base);
        let response = self
            .client
            .post(&url)
            .header("x-api-key", self.api_key.expose_secret())
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed {
                provider: PROVIDER.to_string(),
                reason: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimited {
                provider: PROVIDER.to_string(),
                retry_after: Self::retry_after(response.headers()),
            });
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(LlmError::AuthFailed {
                provider: PROVIDER.to_string(),
            });
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let reason = match serde_json::from_str::<ApiErrorResponse>(&text) {
                Ok(err) => format!("{} ({}): {}", status, err.error.error_type, err.error.message),
                Err(_) => format!("HTTP {status}: {text}"),
            };
            return Err(LlmError::RequestFailed {
                provider: PROVIDER.to_string(),
                reason,
            });
        }

        let parsed: MessagesResponse =
            response.json().await.map_err(|e| LlmError::InvalidResponse {
                provider: PROVIDER.to_string(),
                reason: format!("Failed to parse response: {e}"),
            })?;

        Self::parse_response(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> AnthropicProvider {
        AnthropicProvider::with_base_url(
            SecretString::from("test-key"),
            "claude-sonnet-4-20250514",
            server.uri(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    fn request() -> CompletionRequest {
        CompletionRequest::new(vec![ChatMessage::user("Do you ship internationally?")])
            .with_max_tokens(150)
    }

    #[test]
    fn request_body_is_single_user_turn() {
        let request = request();
        let body = MessagesRequest {
            model: "claude-sonnet-4-20250514",
            max_tokens: request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            messages: &request.messages,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "model": "claude-sonnet-4-20250514",
                "max_tokens": 150,
                "messages": [{"role": "user", "content": "Do you ship internationally?"}]
            })
        );
    }

    #[tokio::test]
    async fn successful_completion() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "test-key"))
            .and(header("anthropic-version", API_VERSION))
            .and(body_partial_json(serde_json::json!({
                "model": "claude-sonnet-4-20250514",
                "max_tokens": 150,
                "messages": [{"role": "user", "content": "Do you ship internationally?"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "msg_01",
                "type": "message",
                "content": [{"type": "text", "text": "Yes! Where to? 🌍"}],
                "stop_reason": "end_turn",
                "usage": {"input_tokens": 12, "output_tokens": 7}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = provider(&server).complete(request()).await.unwrap();
        assert_eq!(response.content, "Yes! Where to? 🌍");
        assert_eq!(response.finish_reason, FinishReason::Stop);
        assert_eq!(response.response_id.as_deref(), Some("msg_01"));
        assert_eq!(response.output_tokens, 7);
    }

    #[tokio::test]
    async fn rate_limit_maps_to_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "30"))
            .mount(&server)
            .await;

        let err = provider(&server).complete(request()).await.unwrap_err();
        match err {
            LlmError::RateLimited { retry_after, .. } => {
                assert_eq!(retry_after, Some(Duration::from_secs(30)));
            }
            other => panic!("Expected RateLimited, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unauthorized_maps_to_auth_failed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "type": "error",
                "error": {"type": "authentication_error", "message": "invalid x-api-key"}
            })))
            .mount(&server)
            .await;

        let err = provider(&server).complete(request()).await.unwrap_err();
        assert!(matches!(err, LlmError::AuthFailed { .. }));
    }

    #[tokio::test]
    async fn server_error_includes_api_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(529).set_body_json(serde_json::json!({
                "type": "error",
                "error": {"type": "overloaded_error", "message": "Overloaded"}
            })))
            .mount(&server)
            .await;

        let err = provider(&server).complete(request()).await.unwrap_err();
        match err {
            LlmError::RequestFailed { reason, .. } => {
                assert!(reason.contains("overloaded_error"), "unexpected reason: {reason}");
            }
            other => panic!("Expected RequestFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "unexpected": true
            })))
            .mount(&server)
            .await;

        let err = provider(&server).complete(request()).await.unwrap_err();
        assert!(matches!(err, LlmError::InvalidResponse { .. }));
    }

    #[tokio::test]
    async fn response_without_text_block_is_invalid() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "content": [{"type": "tool_use", "id": "t1", "name": "x", "input": {}}]
            })))
            .mount(&server)
            .await;

        let err = provider(&server).complete(request()).await.unwrap_err();
        assert!(matches!(err, LlmError::InvalidResponse { .. }));
    }

    #[tokio::test]
    async fn timeout_is_request_failed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let provider = AnthropicProvider::with_base_url(
            SecretString::from("test-key"),
            "claude-sonnet-4-20250514",
            server.uri(),
            Duration::from_millis(100),
        )
        .unwrap();

        let err = provider.complete(request()).await.unwrap_err();
        assert!(matches!(err, LlmError::RequestFailed { .. }));
    }
}
