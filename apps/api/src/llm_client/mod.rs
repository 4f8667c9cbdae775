//! LLM Client: the single point of entry for all model calls in the roadmap service.
//!
//! ARCHITECTURAL RULE: No other module may call the model API directly.
//! The pipeline only sees the `ModelInvoker` trait; `LlmClient` is the production implementation.
//!
//! Model, token budget and temperature are fixed constants, not configuration.
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub mod prompts;

pub const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for roadmap generation.
pub const MODEL: &str = "claude-3-sonnet-20240229";
pub const MAX_TOKENS: u32 = 4096;
pub const TEMPERATURE: f32 = 0.3;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Sends a rendered prompt to a text-generation service and returns the raw reply text.
///
/// Held by the pipeline as `Arc<dyn ModelInvoker>` so tests can substitute a stub.
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    async fn invoke(&self, prompt: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// The raw reply string lives at `content[0].text`.
    pub fn into_text(self) -> Option<String> {
        self.content.into_iter().next().and_then(|b| b.text)
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Wraps the Messages API. Failures are returned as-is; retry policy belongs to the caller.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            api_url,
            api_key,
        })
    }

    /// Makes a single call to the model API, returning the full response object.
    pub async fn call(&self, prompt: &str) -> Result<LlmResponse, LlmError> {
        let request_body = MessagesRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        info!("Invoking model: {MODEL}");

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: api_error_message(body),
            });
        }

        let llm_response: LlmResponse = response.json().await?;

        if let Some(usage) = &llm_response.usage {
            debug!(
                "LLM call succeeded: input_tokens={}, output_tokens={}",
                usage.input_tokens, usage.output_tokens
            );
        }

        Ok(llm_response)
    }
}

#[async_trait]
impl ModelInvoker for LlmClient {
    async fn invoke(&self, prompt: &str) -> Result<String, LlmError> {
        self.call(prompt)
            .await?
            .into_text()
            .ok_or(LlmError::EmptyContent)
    }
}

/// Pulls `error.message` out of a provider error body, falling back to the raw body.
fn api_error_message(body: String) -> String {
    serde_json::from_str::<ApiErrorEnvelope>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}

#[cfg(test)]
mod tests {
    use axum::{
        http::{HeaderMap, StatusCode},
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    use super::*;

    /// Serves `router` on an ephemeral local port and returns its URL.
    async fn serve(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
        format!("http://{addr}/")
    }

    fn client(api_url: String, timeout: Duration) -> LlmClient {
        LlmClient::new("test-key".to_string(), api_url, timeout).unwrap()
    }

    fn replying(status: StatusCode, body: Value) -> Router {
        Router::new().route(
            "/",
            post(move || {
                let body = body.clone();
                async move { (status, Json(body)) }
            }),
        )
    }

    #[test]
    fn test_request_body_matches_messages_contract() {
        let body = MessagesRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            messages: vec![Message {
                role: "user",
                content: "hello",
            }],
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["model"], MODEL);
        assert_eq!(value["max_tokens"], 4096);
        assert!((value["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "hello");
    }

    #[test]
    fn test_reply_text_is_first_content_block() {
        let json = r#"{
            "content": [{"type": "text", "text": "{\"roadmap\": []}"}],
            "usage": {"input_tokens": 10, "output_tokens": 5}
        }"#;
        let response: LlmResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.into_text().as_deref(), Some("{\"roadmap\": []}"));
    }

    #[test]
    fn test_empty_content_yields_none() {
        let response: LlmResponse = serde_json::from_str(r#"{"content": []}"#).unwrap();
        assert!(response.into_text().is_none());
    }

    #[tokio::test]
    async fn test_invoke_sends_headers_and_returns_reply_text() {
        let router = Router::new().route(
            "/",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                let text = format!(
                    "{} {} {} {}",
                    headers["x-api-key"].to_str().unwrap(),
                    headers["anthropic-version"].to_str().unwrap(),
                    body["model"].as_str().unwrap(),
                    body["messages"][0]["content"].as_str().unwrap(),
                );
                Json(json!({
                    "content": [{"type": "text", "text": text}],
                    "usage": {"input_tokens": 3, "output_tokens": 4}
                }))
            }),
        );
        let llm = client(serve(router).await, Duration::from_secs(5));

        let reply = llm.invoke("hello").await.unwrap();
        assert_eq!(reply, format!("test-key {ANTHROPIC_VERSION} {MODEL} hello"));
    }

    #[tokio::test]
    async fn test_non_success_status_is_api_error() {
        let router = replying(
            StatusCode::TOO_MANY_REQUESTS,
            json!({"type": "error", "error": {"type": "rate_limit_error", "message": "Too many requests"}}),
        );
        let llm = client(serve(router).await, Duration::from_secs(5));

        match llm.invoke("hello").await {
            Err(LlmError::Api { status, message }) => {
                assert_eq!(status, 429);
                assert_eq!(message, "Too many requests");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_content_is_empty_content_error() {
        let router = replying(StatusCode::OK, json!({"content": []}));
        let llm = client(serve(router).await, Duration::from_secs(5));

        assert!(matches!(
            llm.invoke("hello").await,
            Err(LlmError::EmptyContent)
        ));
    }

    #[tokio::test]
    async fn test_textless_first_block_is_empty_content_error() {
        let router = replying(
            StatusCode::OK,
            json!({"content": [{"type": "tool_use", "id": "t1"}]}),
        );
        let llm = client(serve(router).await, Duration::from_secs(5));

        assert!(matches!(
            llm.invoke("hello").await,
            Err(LlmError::EmptyContent)
        ));
    }

    #[tokio::test]
    async fn test_undecodable_success_body_is_http_error() {
        let router = replying(StatusCode::OK, json!({"completion": "no content field"}));
        let llm = client(serve(router).await, Duration::from_secs(5));

        assert!(matches!(llm.invoke("hello").await, Err(LlmError::Http(_))));
    }

    #[tokio::test]
    async fn test_connection_refused_is_http_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let llm = client(format!("http://{addr}/"), Duration::from_secs(5));

        assert!(matches!(llm.invoke("hello").await, Err(LlmError::Http(_))));
    }

    #[tokio::test]
    async fn test_slow_endpoint_times_out() {
        let router = Router::new().route(
            "/",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({"content": [{"type": "text", "text": "late"}]}))
            }),
        );
        let llm = client(serve(router).await, Duration::from_millis(100));

        match llm.invoke("hello").await {
            Err(LlmError::Http(e)) => assert!(e.is_timeout()),
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[test]
    fn test_api_error_message_prefers_provider_message() {
        let body = r#"{"type":"error","error":{"type":"rate_limit_error","message":"Too many requests"}}"#;
        assert_eq!(api_error_message(body.to_string()), "Too many requests");
        assert_eq!(api_error_message("gateway down".to_string()), "gateway down");
    }
}
