//! Transports that deliver a Messages API request and return the response

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::RETRY_AFTER, Client, StatusCode};

use crate::llm::core::error::LlmError;

use super::config::ClaudeConfig;
use super::types::{ClaudeErrorResponse, MessagesRequest, MessagesResponse};

/// Sends a built request to Claude and returns the raw response
///
/// Implementations own credentials, retries and timeouts; the translation
/// layer only shapes what is sent and interprets what comes back.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: MessagesRequest) -> Result<MessagesResponse, LlmError>;
}

/// Transport over the public Messages API
pub struct HttpTransport {
    /// HTTP client for making requests
    http_client: Client,
    api_key: String,
    api_version: String,
    endpoint: String,
}

impl HttpTransport {
    /// Create a transport with an already resolved API key
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ClaudeConfig, api_key: String) -> Result<Self, LlmError> {
        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::HttpError {
                status: 0,
                body: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            http_client,
            api_key,
            api_version: config.api_version.clone(),
            endpoint: build_endpoint_url(&config.base_url),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn build_endpoint_url(base_url: &str) -> String {
    format!("{}/v1/messages", base_url.trim_end_matches('/'))
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: MessagesRequest) -> Result<MessagesResponse, LlmError> {
        tracing::debug!(model = %request.model, url = %self.endpoint, "sending messages request");

        let response = self
            .http_client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.api_version)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<MessagesResponse>().await?);
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_secs);
            tracing::warn!(?retry_after, "messages request rate limited");
            return Err(LlmError::RateLimitExceeded { retry_after });
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = status.as_u16(), "messages request failed");
        Err(error_from_body(status.as_u16(), body))
    }
}

/// Prefer the provider's error envelope; fall back to the raw body
fn error_from_body(status: u16, body: String) -> LlmError {
    match serde_json::from_str::<ClaudeErrorResponse>(&body) {
        Ok(envelope) => LlmError::ProviderError {
            code: envelope.error.error_type,
            message: envelope.error.message,
        },
        Err(_) => LlmError::HttpError { status, body },
    }
}
