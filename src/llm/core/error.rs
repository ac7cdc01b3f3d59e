//! Error types for the LLM layer

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when translating requests or invoking a model
#[derive(Debug, Error)]
pub enum LlmError {
    /// No API key was supplied and none was found in the environment
    #[error("Missing credential: set {env_var} in the environment or pass an API key explicitly")]
    MissingCredential { env_var: &'static str },

    /// A model with the same qualified name is already registered
    #[error("Model already registered: {0}")]
    AlreadyRegistered(String),

    /// A model was defined without capabilities and is not a known model
    #[error("Unknown model {0:?} defined without capabilities")]
    UnknownModelCapabilities(String),

    /// The request asks for an output format the provider cannot produce
    #[error("Unsupported output format {0:?}, only \"text\" is supported")]
    UnsupportedOutputFormat(String),

    /// A message part kind the provider cannot encode
    #[error("Unsupported message part kind {0:?}")]
    UnsupportedPartKind(String),

    /// A string that is not a `data:<mime>;base64,<payload>` URL
    #[error("Invalid base64 data URL: {0}")]
    MalformedDataUrl(String),

    /// JSON encoding/decoding issues
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// HTTP request failures
    #[error("HTTP error (status {status}): {body}")]
    HttpError { status: u16, body: String },

    /// Rate limit exceeded
    #[error("Rate limit exceeded (retry after {retry_after:?})")]
    RateLimitExceeded { retry_after: Option<Duration> },

    /// Provider-specific errors
    #[error("Provider error ({code}): {message}")]
    ProviderError { code: String, message: String },
}

impl From<serde_json::Error> for LlmError {
    fn from(err: serde_json::Error) -> Self {
        LlmError::SerializationError(err.to_string())
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        LlmError::HttpError {
            status: err.status().map(|s| s.as_u16()).unwrap_or(0),
            body: err.to_string(),
        }
    }
}
