//! LLM Client: the single point of entry for all chat-model calls in the grader.
//!
//! ARCHITECTURAL RULE: No other module may call the model service directly.
//! Grading code depends on the `ChatModel` trait; `OllamaClient` is the
//! production implementation talking to an Ollama-compatible `/api/chat`.
//!
//! Calls are non-streaming, low-temperature, and never retried.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const CHAT_PATH: &str = "/api/chat";
/// Fixed decoding temperature for grading calls.
pub const TEMPERATURE: f64 = 0.2;
/// Grading a long essay on a local 8B model is slow; allow two minutes.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Any failure to obtain assistant text from the model service.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed response envelope: {0}")]
    MalformedEnvelope(String),
}

/// A chat-completion capability: system + user instruction in, assistant text out.
///
/// Carried in `AppState` as `Arc<dyn ChatModel>` so handlers and the grading
/// pipeline can be exercised against a canned model in tests.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn chat(&self, system: &str, user: &str) -> Result<String, LlmError>;

    /// Model identifier, for logs and the health endpoint.
    fn model_name(&self) -> &str;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    stream: bool,
    options: ChatOptions,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatOptions {
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: Option<ResponseMessage>,
    eval_count: Option<u64>,
    total_duration: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Ollama reports failures as `{"error": "..."}`.
#[derive(Debug, Deserialize)]
struct OllamaError {
    error: String,
}

/// HTTP client for an Ollama-compatible chat endpoint.
#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(base_url: &str, model: &str) -> Result<Self, LlmError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    pub fn chat_url(&self) -> String {
        format!("{}{CHAT_PATH}", self.base_url)
    }
}

#[async_trait]
impl ChatModel for OllamaClient {
    async fn chat(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let request_body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            stream: false,
            options: ChatOptions {
                temperature: TEMPERATURE,
            },
        };

        let response = self
            .client
            .post(self.chat_url())
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<OllamaError>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let content = parse_chat_response(&body)?;
        Ok(content)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Pulls `message.content` out of a non-streaming chat response body.
fn parse_chat_response(body: &str) -> Result<String, LlmError> {
    let envelope: ChatResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::MalformedEnvelope(format!("response is not JSON: {e}")))?;

    debug!(
        "Chat call succeeded: eval_count={:?}, total_duration_ns={:?}",
        envelope.eval_count, envelope.total_duration
    );

    envelope
        .message
        .and_then(|m| m.content)
        .ok_or_else(|| LlmError::MalformedEnvelope("missing message.content".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_parse_chat_response_valid() {
        let body = r#"{"model":"llama3.1:8b","message":{"role":"assistant","content":"{\"a\":1}"},"done":true}"#;
        assert_eq!(parse_chat_response(body).unwrap(), "{\"a\":1}");
    }

    #[test]
    fn test_parse_chat_response_missing_message() {
        let err = parse_chat_response(r#"{"model":"llama3.1:8b"}"#).unwrap_err();
        assert!(matches!(err, LlmError::MalformedEnvelope(_)));
    }

    #[test]
    fn test_parse_chat_response_missing_content() {
        let err = parse_chat_response(r#"{"message":{"role":"assistant"}}"#).unwrap_err();
        assert!(matches!(err, LlmError::MalformedEnvelope(_)));
    }

    #[test]
    fn test_parse_chat_response_not_json() {
        let err = parse_chat_response("<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, LlmError::MalformedEnvelope(_)));
    }

    #[test]
    fn test_chat_url_tolerates_trailing_slash() {
        let client = OllamaClient::new("http://localhost:11434/", "llama3.1:8b").unwrap();
        assert_eq!(client.chat_url(), "http://localhost:11434/api/chat");
        assert_eq!(client.model_name(), "llama3.1:8b");
    }

    #[tokio::test]
    async fn test_chat_sends_expected_body_and_returns_content() {
        let mock_server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .and(matchers::path("/api/chat"))
            .and(matchers::body_partial_json(json!({
                "model": "llama3.1:8b",
                "stream": false,
                "options": {"temperature": 0.2},
                "messages": [
                    {"role": "system", "content": "be fair"},
                    {"role": "user", "content": "grade this"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model": "llama3.1:8b",
                "message": {"role": "assistant", "content": "{\"overall_score\": 9}"},
                "done": true
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = OllamaClient::new(&mock_server.uri(), "llama3.1:8b").unwrap();
        let content = client.chat("be fair", "grade this").await.unwrap();
        assert_eq!(content, "{\"overall_score\": 9}");
    }

    #[tokio::test]
    async fn test_chat_non_success_status_is_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .and(matchers::path("/api/chat"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({"error": "model 'llama3.1:8b' not found"})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = OllamaClient::new(&mock_server.uri(), "llama3.1:8b").unwrap();
        let err = client.chat("s", "u").await.unwrap_err();
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 404);
                assert!(message.contains("not found"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_chat_server_error_is_not_retried() {
        let mock_server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = OllamaClient::new(&mock_server.uri(), "llama3.1:8b").unwrap();
        let err = client.chat("s", "u").await.unwrap_err();
        assert!(matches!(err, LlmError::Api { status: 503, .. }));
        assert!(err.to_string().contains("overloaded"));
    }

    #[tokio::test]
    async fn test_chat_malformed_envelope() {
        let mock_server = MockServer::start().await;

        Mock::given(matchers::method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"done": true})))
            .mount(&mock_server)
            .await;

        let client = OllamaClient::new(&mock_server.uri(), "llama3.1:8b").unwrap();
        let err = client.chat("s", "u").await.unwrap_err();
        assert!(matches!(err, LlmError::MalformedEnvelope(_)));
    }

    #[tokio::test]
    async fn test_chat_connection_refused_is_http_error() {
        // Port 1 (tcpmux) is never served locally.
        let client = OllamaClient::new("http://127.0.0.1:1", "llama3.1:8b").unwrap();
        let err = client.chat("s", "u").await.unwrap_err();
        assert!(matches!(err, LlmError::Http(_)));
    }
}
