//! Plugin configuration and Claude-specific generation parameters

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::llm::core::{config::GenerationCommonConfig, error::LlmError};

use super::types::{ClaudeMetadata, ClaudeToolChoice};

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Default Messages API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Default value of the `anthropic-version` header
pub const DEFAULT_API_VERSION: &str = "2023-06-01";

/// Connection settings for the Anthropic API
#[derive(Debug, Clone)]
pub struct ClaudeConfig {
    /// API key; falls back to `ANTHROPIC_API_KEY` when unset or empty
    pub api_key: Option<String>,
    /// Base URL without the `/v1/messages` path
    pub base_url: String,
    /// Value sent as `anthropic-version`
    pub api_version: String,
    /// Whole-request timeout
    pub timeout: Duration,
}

impl ClaudeConfig {
    /// Configuration with defaults and no explicit key
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: Duration::from_secs(600),
        }
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the `anthropic-version` header value
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve the API key from the config or the process environment
    ///
    /// # Errors
    ///
    /// Returns `MissingCredential` when neither source has a non-empty key.
    pub fn resolve_api_key(&self) -> Result<String, LlmError> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    /// Resolve the API key using `lookup` in place of the environment
    pub fn resolve_api_key_with<F>(&self, lookup: F) -> Result<String, LlmError>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        if let Some(key) = self.api_key.as_ref().filter(|k| !k.is_empty()) {
            return Ok(key.clone());
        }

        lookup(API_KEY_ENV)
            .filter(|k| !k.is_empty())
            .ok_or(LlmError::MissingCredential {
                env_var: API_KEY_ENV,
            })
    }
}

impl Default for ClaudeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Generation parameters specific to Claude
///
/// Attach to a request with [`GenerateRequest::with_provider_config`]. When
/// present, every common field here replaces the request's common config,
/// unset fields included.
///
/// [`GenerateRequest::with_provider_config`]: crate::llm::GenerateRequest::with_provider_config
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaudeGenerationConfig {
    #[serde(flatten)]
    pub common: GenerationCommonConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<ClaudeToolChoice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ClaudeMetadata>,
}

impl ClaudeGenerationConfig {
    pub fn new(common: GenerationCommonConfig) -> Self {
        Self {
            common,
            ..Self::default()
        }
    }

    /// Set the tool choice policy
    pub fn with_tool_choice(mut self, tool_choice: ClaudeToolChoice) -> Self {
        self.tool_choice = Some(tool_choice);
        self
    }

    /// Set the request metadata
    pub fn with_metadata(mut self, metadata: ClaudeMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_config_defaults() {
        let config = ClaudeConfig::new();
        assert!(config.api_key.is_none());
        assert_eq!(config.base_url, "https://api.anthropic.com");
        assert_eq!(config.api_version, "2023-06-01");
    }

    #[test]
    fn test_explicit_key_wins_over_env() {
        let config = ClaudeConfig::new().with_api_key("explicit");
        let key = config
            .resolve_api_key_with(|_| Some("from-env".to_string()))
            .unwrap();
        assert_eq!(key, "explicit");
    }

    #[test]
    fn test_empty_key_falls_back_to_env() {
        let config = ClaudeConfig::new().with_api_key("");
        let key = config
            .resolve_api_key_with(|name| {
                assert_eq!(name, "ANTHROPIC_API_KEY");
                Some("from-env".to_string())
            })
            .unwrap();
        assert_eq!(key, "from-env");
    }

    #[test]
    fn test_missing_key_is_error() {
        let config = ClaudeConfig::new();

        let err = config.resolve_api_key_with(|_| None).unwrap_err();
        assert!(matches!(
            err,
            LlmError::MissingCredential {
                env_var: "ANTHROPIC_API_KEY"
            }
        ));

        let err = config
            .resolve_api_key_with(|_| Some(String::new()))
            .unwrap_err();
        assert!(matches!(err, LlmError::MissingCredential { .. }));
    }

    #[test]
    fn test_generation_config_flattens_common_fields() {
        let config = ClaudeGenerationConfig::new(
            GenerationCommonConfig::new().with_temperature(0.9),
        )
        .with_tool_choice(ClaudeToolChoice::Any);

        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value, json!({"temperature": 0.9, "tool_choice": {"type": "any"}}));

        let decoded: ClaudeGenerationConfig = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, config);
    }
}
