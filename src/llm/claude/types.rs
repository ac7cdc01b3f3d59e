//! Claude-specific request and response types
//!
//! These types map directly to the Anthropic Messages API schema.

use serde::{Deserialize, Serialize};

/// Request body for `POST /v1/messages`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagesRequest {
    /// Model identifier
    pub model: String,
    /// Maximum number of tokens to generate (required)
    pub max_tokens: u32,
    /// Array of messages in the conversation
    pub messages: Vec<ClaudeMessage>,
    /// System prompt blocks (top-level field)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub system: Vec<ClaudeSystemBlock>,
    /// Available tools for the model to use
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ClaudeTool>,
    /// How the model may use the tools
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<ClaudeToolChoice>,
    /// Request metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ClaudeMetadata>,
    /// Temperature (0.0-1.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Top-k sampling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    /// Top-p nucleus sampling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    /// Stop sequences
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
}

/// A block of the top-level system prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClaudeSystemBlock {
    Text { text: String },
}

/// Conversational role on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaudeRole {
    User,
    Assistant,
}

/// A single message in the Claude conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaudeMessage {
    pub role: ClaudeRole,
    pub content: Vec<ClaudeContentBlock>,
}

/// A content block within a request message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClaudeContentBlock {
    /// Text content
    Text { text: String },
    /// Inline image
    Image { source: ClaudeImageSource },
    /// Tool use block (model invoking a tool)
    ToolUse {
        id: String,
        name: String,
        input: serde_json::Value,
    },
    /// Tool result block (application providing tool result)
    ToolResult {
        tool_use_id: String,
        content: Vec<ClaudeToolResultContent>,
        is_error: bool,
    },
}

/// Where image bytes come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClaudeImageSource {
    Base64 { media_type: String, data: String },
}

/// Content allowed inside a tool result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClaudeToolResultContent {
    Text { text: String },
    Image { source: ClaudeImageSource },
}

/// Tool definition for Claude
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaudeTool {
    /// Tool name
    pub name: String,
    /// Tool description
    pub description: String,
    /// Input schema (JSON Schema)
    pub input_schema: serde_json::Value,
}

/// Tool choice policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClaudeToolChoice {
    /// Model decides whether to call a tool
    Auto,
    /// Model must call some tool
    Any,
    /// Model must call the named tool
    Tool { name: String },
    /// Model must not call tools
    None,
}

/// Request metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaudeMetadata {
    /// Opaque end-user identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Response body of `POST /v1/messages`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessagesResponse {
    /// Message ID
    pub id: String,
    /// Message role (always "assistant" for responses)
    #[serde(default)]
    pub role: String,
    /// Model identifier
    #[serde(default)]
    pub model: String,
    /// Generated content
    #[serde(default)]
    pub content: Vec<ClaudeResponseBlock>,
    /// Why generation stopped
    pub stop_reason: Option<String>,
    /// Stop sequence that triggered stop (if any)
    #[serde(default)]
    pub stop_sequence: Option<String>,
    pub usage: ClaudeUsage,
}

/// A content block in a response
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClaudeResponseBlock {
    Text {
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        input: serde_json::Value,
    },
    /// Block kinds this crate does not interpret
    #[serde(other)]
    Unsupported,
}

/// Usage metadata
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ClaudeUsage {
    /// Input tokens consumed
    #[serde(default)]
    pub input_tokens: u32,
    /// Output tokens generated
    #[serde(default)]
    pub output_tokens: u32,
}

/// Error envelope returned with non-success statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ClaudeErrorResponse {
    pub error: ClaudeErrorData,
}

/// Error data
#[derive(Debug, Clone, Deserialize)]
pub struct ClaudeErrorData {
    /// Error type
    #[serde(rename = "type")]
    pub error_type: String,
    /// Error message
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_messages_request_omits_unset_fields() {
        let request = MessagesRequest {
            model: "claude-3-5-haiku-20241022".to_string(),
            max_tokens: 1024,
            messages: vec![ClaudeMessage {
                role: ClaudeRole::User,
                content: vec![ClaudeContentBlock::Text {
                    text: "Hello".to_string(),
                }],
            }],
            system: vec![],
            tools: vec![],
            tool_choice: None,
            metadata: None,
            temperature: Some(0.7),
            top_k: None,
            top_p: None,
            stop_sequences: None,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "model": "claude-3-5-haiku-20241022",
                "max_tokens": 1024,
                "messages": [{"role": "user", "content": [{"type": "text", "text": "Hello"}]}],
                "temperature": 0.7
            })
        );
    }

    #[test]
    fn test_system_block_serialization() {
        let block = ClaudeSystemBlock::Text {
            text: "You are helpful".to_string(),
        };
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value, json!({"type": "text", "text": "You are helpful"}));
    }

    #[test]
    fn test_image_block_serialization() {
        let block = ClaudeContentBlock::Image {
            source: ClaudeImageSource::Base64 {
                media_type: "image/png".to_string(),
                data: "AAA=".to_string(),
            },
        };
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "image",
                "source": {"type": "base64", "media_type": "image/png", "data": "AAA="}
            })
        );
    }

    #[test]
    fn test_tool_result_block_serialization() {
        let block = ClaudeContentBlock::ToolResult {
            tool_use_id: "get_weather".to_string(),
            content: vec![ClaudeToolResultContent::Text {
                text: "72°F".to_string(),
            }],
            is_error: false,
        };

        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value["type"], "tool_result");
        assert_eq!(value["tool_use_id"], "get_weather");
        assert_eq!(value["content"][0]["text"], "72°F");
        assert_eq!(value["is_error"], false);
    }

    #[test]
    fn test_tool_choice_serialization() {
        assert_eq!(
            serde_json::to_value(&ClaudeToolChoice::Auto).unwrap(),
            json!({"type": "auto"})
        );
        assert_eq!(
            serde_json::to_value(&ClaudeToolChoice::Tool {
                name: "get_weather".to_string()
            })
            .unwrap(),
            json!({"type": "tool", "name": "get_weather"})
        );
    }

    #[test]
    fn test_messages_response_deserialization() {
        let json = r#"{
            "id": "msg_123",
            "type": "message",
            "role": "assistant",
            "model": "claude-3-5-sonnet-20241022",
            "content": [
                {"type": "text", "text": "Let me check"},
                {"type": "tool_use", "id": "toolu_1", "name": "get_weather", "input": {"location": "SF"}},
                {"type": "thinking", "thinking": "hmm", "signature": "sig"}
            ],
            "stop_reason": "tool_use",
            "stop_sequence": null,
            "usage": {"input_tokens": 10, "output_tokens": 25}
        }"#;

        let response: MessagesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.id, "msg_123");
        assert_eq!(response.stop_reason.as_deref(), Some("tool_use"));
        assert_eq!(response.content.len(), 3);
        assert!(matches!(response.content[1], ClaudeResponseBlock::ToolUse { ref name, .. } if name == "get_weather"));
        assert_eq!(response.content[2], ClaudeResponseBlock::Unsupported);
        assert_eq!(response.usage.output_tokens, 25);
    }

    #[test]
    fn test_error_response_deserialization() {
        let json = r#"{"type":"error","error":{"type":"invalid_request_error","message":"bad"}}"#;
        let response: ClaudeErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.error.error_type, "invalid_request_error");
        assert_eq!(response.error.message, "bad");
    }
}
