//! Tool definition helpers using JSON Schema generation

use schemars::{schema_for, JsonSchema};

use crate::llm::core::{error::LlmError, types::ToolDefinition};

/// Create a tool definition from a type that implements JsonSchema
///
/// The input schema is generated from `T` with schemars, so doc comments on
/// fields become descriptions the model can read.
///
/// # Example
///
/// ```ignore
/// use schemars::JsonSchema;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, JsonSchema)]
/// struct WeatherArgs {
///     /// City to look up
///     location: String,
/// }
///
/// let tool = create_tool_definition::<WeatherArgs>(
///     "get_weather",
///     "Get the current weather for a city",
/// )?;
/// ```
pub fn create_tool_definition<T: JsonSchema>(
    name: impl Into<String>,
    description: impl Into<String>,
) -> Result<ToolDefinition, LlmError> {
    let schema = schema_for!(T);
    Ok(ToolDefinition {
        name: name.into(),
        description: description.into(),
        input_schema: serde_json::to_value(&schema)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    use crate::llm::claude::mapper::convert_tools;

    #[allow(dead_code)]
    #[derive(Deserialize, JsonSchema)]
    struct WeatherArgs {
        /// City to look up
        location: String,
        /// Temperature unit
        unit: Option<String>,
    }

    #[test]
    fn test_create_tool_definition() {
        let tool = create_tool_definition::<WeatherArgs>("get_weather", "Get weather").unwrap();

        assert_eq!(tool.name, "get_weather");
        assert_eq!(tool.description, "Get weather");

        let schema_obj = tool.input_schema.as_object().unwrap();
        assert_eq!(schema_obj["type"], "object");
        assert!(schema_obj["properties"]["location"].is_object());
        assert_eq!(schema_obj["required"], serde_json::json!(["location"]));
    }

    #[test]
    fn test_schema_includes_doc_comments() {
        let tool = create_tool_definition::<WeatherArgs>("get_weather", "Get weather").unwrap();

        let schema_str = serde_json::to_string(&tool.input_schema).unwrap();
        assert!(schema_str.contains("City to look up"));
        assert!(schema_str.contains("Temperature unit"));
    }

    #[test]
    fn test_generated_schema_passes_through_converter() {
        let tool = create_tool_definition::<WeatherArgs>("get_weather", "Get weather").unwrap();

        let claude_tools = convert_tools(std::slice::from_ref(&tool));

        assert_eq!(claude_tools[0].input_schema, tool.input_schema);
    }
}
