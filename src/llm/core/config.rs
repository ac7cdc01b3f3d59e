//! Generation configuration parameters

use serde::{Deserialize, Serialize};

/// Provider-neutral parameters for controlling text generation
///
/// Every field is optional; providers decide what an unset field means.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationCommonConfig {
    /// Maximum number of tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    /// Randomness (higher = more random)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Top-k sampling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    /// Nucleus sampling threshold
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    /// Stop generation when these sequences are encountered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
}

impl GenerationCommonConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of output tokens
    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    /// Set the temperature
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the top_k value
    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = Some(top_k);
        self
    }

    /// Set the top_p value
    pub fn with_top_p(mut self, top_p: f64) -> Self {
        self.top_p = Some(top_p);
        self
    }

    /// Set stop sequences
    pub fn with_stop_sequences(mut self, stop_sequences: Vec<String>) -> Self {
        self.stop_sequences = Some(stop_sequences);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new_is_empty() {
        let config = GenerationCommonConfig::new();
        assert!(config.max_output_tokens.is_none());
        assert!(config.temperature.is_none());
        assert!(config.top_k.is_none());
        assert!(config.top_p.is_none());
        assert!(config.stop_sequences.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = GenerationCommonConfig::new()
            .with_max_output_tokens(2048)
            .with_temperature(0.7)
            .with_top_p(0.9)
            .with_top_k(40)
            .with_stop_sequences(vec!["STOP".to_string()]);

        assert_eq!(config.max_output_tokens, Some(2048));
        assert_eq!(config.temperature, Some(0.7));
        assert_eq!(config.top_p, Some(0.9));
        assert_eq!(config.top_k, Some(40));
        assert_eq!(config.stop_sequences, Some(vec!["STOP".to_string()]));
    }

    #[test]
    fn test_config_serialization() {
        let config = GenerationCommonConfig::new()
            .with_max_output_tokens(1024)
            .with_temperature(0.5);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"max_output_tokens\":1024"));
        assert!(json.contains("\"temperature\":0.5"));
        // Unset fields are omitted
        assert!(!json.contains("\"top_p\""));
        assert!(!json.contains("\"top_k\""));
        assert!(!json.contains("\"stop_sequences\""));
    }

    #[test]
    fn test_config_deserialization() {
        let json = r#"{"max_output_tokens":2048,"temperature":0.8}"#;
        let config: GenerationCommonConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.max_output_tokens, Some(2048));
        assert_eq!(config.temperature, Some(0.8));
        assert!(config.top_p.is_none());
    }
}
