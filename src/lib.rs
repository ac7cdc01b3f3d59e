// LLM abstraction layer
pub mod llm;
