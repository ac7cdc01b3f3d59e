//! Core types for the LLM abstraction layer
//!
//! These are provider-neutral: a conversation is a list of role-tagged
//! messages whose content is a list of typed parts.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::config::GenerationCommonConfig;
use super::error::LlmError;

/// Role of a message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Human input
    User,
    /// Instructions that steer the model
    System,
    /// Model output
    Model,
    /// Tool execution results
    Tool,
}

/// A single piece of message content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Part {
    /// Plain text
    Text { text: String },
    /// Inline media; `data` is the base64 payload
    Media { content_type: String, data: String },
    /// The model asking for a tool to be run
    ToolRequest(ToolRequest),
    /// The result of running a tool
    ToolResponse(ToolResponse),
    /// Arbitrary structured data
    Data { data: Value },
}

impl Part {
    /// Create a text part
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }

    /// Create an inline media part
    pub fn media(content_type: impl Into<String>, data: impl Into<String>) -> Self {
        Part::Media {
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    /// The serialized name of this part's kind
    pub fn kind(&self) -> &'static str {
        match self {
            Part::Text { .. } => "text",
            Part::Media { .. } => "media",
            Part::ToolRequest(_) => "tool_request",
            Part::ToolResponse(_) => "tool_response",
            Part::Data { .. } => "data",
        }
    }

    /// The text of a text part
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text { text } => Some(text),
            _ => None,
        }
    }
}

/// A tool invocation requested by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolRequest {
    /// Tool name
    pub name: String,
    /// Identifier correlating the request with its response
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Tool arguments
    pub input: Value,
}

/// Output of a tool invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResponse {
    /// Tool name
    pub name: String,
    /// Identifier of the request this answers
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Tool output
    pub output: Map<String, Value>,
}

/// A single message in the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender
    pub role: Role,
    /// Content parts in the message
    pub content: Vec<Part>,
}

impl Message {
    /// Create a message from a role and parts
    pub fn new(role: Role, content: Vec<Part>) -> Self {
        Self { role, content }
    }

    /// Create a new user message with text content
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, vec![Part::text(text)])
    }

    /// Create a new model message with text content
    pub fn model(text: impl Into<String>) -> Self {
        Self::new(Role::Model, vec![Part::text(text)])
    }

    /// Create a new system message with text content
    pub fn system(text: impl Into<String>) -> Self {
        Self::new(Role::System, vec![Part::text(text)])
    }

    /// Create a tool message carrying one tool response
    pub fn tool_response(name: impl Into<String>, output: Map<String, Value>) -> Self {
        Self::new(
            Role::Tool,
            vec![Part::ToolResponse(ToolResponse {
                name: name.into(),
                reference: None,
                output,
            })],
        )
    }

    /// Concatenated text of all text parts
    pub fn text(&self) -> String {
        self.content.iter().filter_map(Part::as_text).collect()
    }
}

/// Declaration of a tool available to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Function name
    pub name: String,
    /// What the tool does
    pub description: String,
    /// JSON Schema for parameters
    pub input_schema: Value,
}

/// Format the caller wants the model output in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
    Media,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Media => "media",
        }
    }
}

/// Requested output shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// JSON Schema the output should satisfy (json format only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
}

/// Request to generate content from an LLM
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Conversation history
    pub messages: Vec<Message>,
    /// Available tools the model can call
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDefinition>,
    /// Requested output format; absent means text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputConfig>,
    /// Provider-neutral generation parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<GenerationCommonConfig>,
    /// Provider-specific generation parameters, applied after `config`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_config: Option<Value>,
}

impl GenerateRequest {
    /// Create a request for the given conversation
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            ..Self::default()
        }
    }

    /// Set the available tools
    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = tools;
        self
    }

    /// Set the requested output format
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output = Some(OutputConfig {
            format,
            schema: None,
        });
        self
    }

    /// Set the provider-neutral generation parameters
    pub fn with_config(mut self, config: GenerationCommonConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set provider-specific generation parameters
    ///
    /// # Errors
    ///
    /// Returns `SerializationError` if `config` cannot be encoded as JSON.
    pub fn with_provider_config<T: Serialize>(mut self, config: &T) -> Result<Self, LlmError> {
        self.provider_config = Some(serde_json::to_value(config)?);
        Ok(self)
    }
}

/// Reason why generation finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinishReason {
    /// Natural completion
    Stop,
    /// Hit token limit
    Length,
    /// Stopped for a provider-specific reason
    Other,
    /// Provider did not report a recognised reason
    Unknown,
}

/// One alternative produced by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub index: usize,
    pub message: Message,
    pub finish_reason: FinishReason,
}

/// Token usage information
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationUsage {
    /// Prompt tokens consumed
    pub input_tokens: u64,
    /// Response tokens generated
    pub output_tokens: u64,
    /// Sum of input and output
    pub total_tokens: u64,
}

impl GenerationUsage {
    /// Create new usage information
    pub fn new(input_tokens: u64, output_tokens: u64) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens: input_tokens + output_tokens,
        }
    }
}

/// Response from a model invocation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub candidates: Vec<Candidate>,
    pub usage: GenerationUsage,
    /// The request that produced this response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<GenerateRequest>,
}

impl GenerateResponse {
    /// Text of the first candidate, if any
    pub fn text(&self) -> Option<String> {
        self.candidates.first().map(|c| c.message.text())
    }
}

/// A partial result delivered to a streaming callback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponseChunk {
    pub index: usize,
    pub role: Role,
    pub content: Vec<Part>,
}
