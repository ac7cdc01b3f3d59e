//! Mapping between abstraction types and Claude-specific types

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::llm::core::{
    config::GenerationCommonConfig,
    error::LlmError,
    types::{
        Candidate, FinishReason, GenerateRequest, GenerateResponse, GenerationUsage, Message,
        OutputFormat, Part, Role, ToolDefinition, ToolRequest, ToolResponse,
    },
};

use super::config::ClaudeGenerationConfig;
use super::types::{
    ClaudeContentBlock, ClaudeImageSource, ClaudeMessage, ClaudeResponseBlock, ClaudeRole,
    ClaudeSystemBlock, ClaudeTool, ClaudeToolResultContent, MessagesRequest, MessagesResponse,
};

/// Used when no config sets `max_tokens`, which the API requires
pub const DEFAULT_MAX_TOKENS: u32 = 1024;

static DATA_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^data:([^;]+);base64,(.+)$").expect("data URL pattern is valid")
});

/// Where a converted message ends up in the request
enum Destination {
    System,
    Conversation(ClaudeRole),
}

fn convert_role(role: Role) -> Destination {
    match role {
        Role::User | Role::Tool => Destination::Conversation(ClaudeRole::User),
        Role::Model => Destination::Conversation(ClaudeRole::Assistant),
        Role::System => Destination::System,
    }
}

/// Convert our abstraction request to Claude's request format
///
/// Generation parameters are applied in two layers: the common `config`
/// first, then the Claude-specific `provider_config`, whose fields replace
/// the common ones wholesale.
pub fn convert_request(model: &str, input: &GenerateRequest) -> Result<MessagesRequest, LlmError> {
    if let Some(output) = &input.output {
        if output.format != OutputFormat::Text {
            return Err(LlmError::UnsupportedOutputFormat(
                output.format.as_str().to_string(),
            ));
        }
    }

    let (system, messages) = convert_messages(&input.messages)?;
    let tools = convert_tools(&input.tools);

    let mut request = MessagesRequest {
        model: model.to_string(),
        max_tokens: DEFAULT_MAX_TOKENS,
        messages,
        system,
        tools,
        tool_choice: None,
        metadata: None,
        temperature: None,
        top_k: None,
        top_p: None,
        stop_sequences: None,
    };

    if let Some(config) = &input.config {
        apply_common_config(&mut request, config);
    }

    if let Some(raw) = &input.provider_config {
        let config: ClaudeGenerationConfig = serde_json::from_value(raw.clone())
            .map_err(|e| LlmError::InvalidRequest(format!("invalid Claude config: {}", e)))?;
        apply_common_config(&mut request, &config.common);
        request.tool_choice = config.tool_choice;
        request.metadata = config.metadata;
    }

    Ok(request)
}

fn apply_common_config(request: &mut MessagesRequest, config: &GenerationCommonConfig) {
    request.max_tokens = config.max_output_tokens.unwrap_or(DEFAULT_MAX_TOKENS);
    request.top_k = config.top_k;
    request.top_p = config.top_p;
    request.temperature = config.temperature;
    request.stop_sequences = config.stop_sequences.clone();
}

/// Split a conversation into system blocks and Claude messages
///
/// System-role messages feed the top-level system prompt and may only carry
/// text. Every other message becomes one Claude message, in order.
pub fn convert_messages(
    messages: &[Message],
) -> Result<(Vec<ClaudeSystemBlock>, Vec<ClaudeMessage>), LlmError> {
    let mut system = Vec::new();
    let mut conversation = Vec::with_capacity(messages.len());

    for message in messages {
        match convert_role(message.role) {
            Destination::System => {
                for part in &message.content {
                    match part {
                        Part::Text { text } => {
                            system.push(ClaudeSystemBlock::Text { text: text.clone() })
                        }
                        other => return Err(LlmError::UnsupportedPartKind(other.kind().to_string())),
                    }
                }
            }
            Destination::Conversation(role) => {
                let content = message
                    .content
                    .iter()
                    .map(convert_part)
                    .collect::<Result<Vec<_>, _>>()?;
                conversation.push(ClaudeMessage { role, content });
            }
        }
    }

    Ok((system, conversation))
}

/// Convert one of our parts to Claude's content block
fn convert_part(part: &Part) -> Result<ClaudeContentBlock, LlmError> {
    match part {
        Part::Text { text } => Ok(ClaudeContentBlock::Text { text: text.clone() }),
        Part::Media { content_type, data } => Ok(ClaudeContentBlock::Image {
            source: ClaudeImageSource::Base64 {
                media_type: content_type.clone(),
                data: data.clone(),
            },
        }),
        Part::ToolRequest(request) => Ok(ClaudeContentBlock::ToolUse {
            id: tool_call_id(&request.name, request.reference.as_deref()),
            name: request.name.clone(),
            input: request.input.clone(),
        }),
        Part::ToolResponse(response) => Ok(ClaudeContentBlock::ToolResult {
            tool_use_id: tool_call_id(&response.name, response.reference.as_deref()),
            content: vec![convert_tool_response(response)?],
            is_error: false,
        }),
        Part::Data { .. } => Err(LlmError::UnsupportedPartKind(part.kind().to_string())),
    }
}

/// Tool calls are correlated by reference when one exists, else by name
fn tool_call_id(name: &str, reference: Option<&str>) -> String {
    reference.unwrap_or(name).to_string()
}

/// Encode a tool's output as tool result content
///
/// An output with a `url` holding a base64 data URL becomes an image, with
/// `contentType` overriding the URL's media type. Anything else is sent as
/// the JSON text of the whole output map.
pub fn convert_tool_response(response: &ToolResponse) -> Result<ClaudeToolResultContent, LlmError> {
    if let Some(url) = response.output.get("url").and_then(Value::as_str) {
        match extract_data_from_base64_url(url) {
            Ok((data, media_type)) => {
                let media_type = response
                    .output
                    .get("contentType")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or(media_type);
                return Ok(ClaudeToolResultContent::Image {
                    source: ClaudeImageSource::Base64 { media_type, data },
                });
            }
            Err(e) => {
                tracing::debug!(tool = %response.name, error = %e, "tool output url is not inline data, sending as text");
            }
        }
    }

    let text = serde_json::to_string(&response.output)?;
    Ok(ClaudeToolResultContent::Text { text })
}

/// Split a `data:<media-type>;base64,<payload>` URL into `(payload, media-type)`
pub fn extract_data_from_base64_url(url: &str) -> Result<(String, String), LlmError> {
    let captures = DATA_URL
        .captures(url)
        .ok_or_else(|| LlmError::MalformedDataUrl(truncate(url, 64)))?;
    Ok((captures[2].to_string(), captures[1].to_string()))
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

/// Convert our ToolDefinitions to Claude's ClaudeTools
pub fn convert_tools(tools: &[ToolDefinition]) -> Vec<ClaudeTool> {
    tools
        .iter()
        .map(|tool| ClaudeTool {
            name: tool.name.clone(),
            description: tool.description.clone(),
            input_schema: tool.input_schema.clone(),
        })
        .collect()
}

/// Convert Claude's response to our abstraction's response
///
/// Each content block becomes its own candidate; all of them share the
/// response-level stop reason. The request back-reference is left unset.
pub fn translate_response(response: MessagesResponse) -> GenerateResponse {
    let finish_reason = map_stop_reason(response.stop_reason.as_deref());

    let candidates = response
        .content
        .into_iter()
        .enumerate()
        .map(|(index, block)| Candidate {
            index,
            message: Message::new(Role::Model, vec![translate_block(block)]),
            finish_reason,
        })
        .collect();

    GenerateResponse {
        candidates,
        usage: GenerationUsage::new(
            u64::from(response.usage.input_tokens),
            u64::from(response.usage.output_tokens),
        ),
        request: None,
    }
}

fn translate_block(block: ClaudeResponseBlock) -> Part {
    match block {
        ClaudeResponseBlock::Text { text } => Part::Text { text },
        ClaudeResponseBlock::ToolUse { id, name, input } => Part::ToolRequest(ToolRequest {
            name,
            reference: Some(id),
            input,
        }),
        ClaudeResponseBlock::Unsupported => Part::text(""),
    }
}

/// Map Claude's stop reason to our finish reason
pub fn map_stop_reason(stop_reason: Option<&str>) -> FinishReason {
    match stop_reason {
        Some("end_turn") => FinishReason::Stop,
        Some("max_tokens") => FinishReason::Length,
        Some("stop_sequence") | Some("tool_use") => FinishReason::Other,
        _ => FinishReason::Unknown,
    }
}
