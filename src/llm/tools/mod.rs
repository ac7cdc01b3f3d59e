//! Tool helpers
//!
//! Builds [`ToolDefinition`](crate::llm::ToolDefinition)s from Rust types so
//! their input schemas stay in sync with the argument structs.

pub mod declaration;

pub use declaration::create_tool_definition;
