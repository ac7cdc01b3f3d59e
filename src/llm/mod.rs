//! LLM Abstraction Layer
//!
//! Provider-neutral conversation types, a model registry, and the Anthropic
//! Claude adapter that translates between them and the Messages API.

pub mod claude;
pub mod core;
pub mod tools;

// Re-export commonly used types
pub use self::core::{
    config::GenerationCommonConfig,
    error::LlmError,
    provider::{Model, ModelCapabilities, ModelInfo, StreamCallback},
    registry::ModelRegistry,
    types::{
        Candidate, FinishReason, GenerateRequest, GenerateResponse, GenerateResponseChunk,
        GenerationUsage, Message, OutputConfig, OutputFormat, Part, Role, ToolDefinition,
        ToolRequest, ToolResponse,
    },
};

pub use claude::{ClaudeConfig, ClaudeModel, ClaudePlugin};
pub use tools::create_tool_definition;
