//! Claude provider implementation
//!
//! This module translates provider-neutral requests into Anthropic Messages
//! API requests, sends them through a [`Transport`], and translates the
//! responses back.

pub mod client;
pub mod config;
pub mod mapper;
pub mod transport;
pub mod types;

// Re-export commonly used types
pub use client::{generate, ClaudeModel, ClaudePlugin, PROVIDER};
pub use config::{ClaudeConfig, ClaudeGenerationConfig};
pub use transport::{HttpTransport, Transport};
