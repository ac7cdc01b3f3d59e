#![allow(dead_code)]

use serde_json::{json, Value};

/// Model used by tests that talk to a server
pub const TEST_MODEL: &str = "claude-3-5-haiku-20241022";

/// A Messages API response body with a single text block
pub fn text_response_body(text: &str, stop_reason: &str) -> Value {
    json!({
        "id": "msg_test",
        "type": "message",
        "role": "assistant",
        "model": TEST_MODEL,
        "content": [{"type": "text", "text": text}],
        "stop_reason": stop_reason,
        "stop_sequence": null,
        "usage": {"input_tokens": 12, "output_tokens": 15}
    })
}

/// Tool schema shared by the tool-calling tests
pub fn weather_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "location": {
                "type": "string",
                "description": "The city and state, e.g. San Francisco, CA"
            }
        },
        "required": ["location"]
    })
}
