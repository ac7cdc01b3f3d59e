//! Model handles: a named, capability-tagged callable

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

use super::{
    error::LlmError,
    types::{GenerateRequest, GenerateResponse, GenerateResponseChunk},
};

/// Callback receiving partial results while a response is produced
pub type StreamCallback = Arc<dyn Fn(GenerateResponseChunk) -> Result<(), LlmError> + Send + Sync>;

/// The function backing a model
pub type ModelFn = Arc<
    dyn Fn(GenerateRequest, Option<StreamCallback>) -> BoxFuture<'static, Result<GenerateResponse, LlmError>>
        + Send
        + Sync,
>;

/// What a model supports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelCapabilities {
    /// Accepts conversation history
    pub multiturn: bool,
    /// Can call tools
    pub tools: bool,
    /// Accepts system instructions
    pub system_role: bool,
    /// Accepts media input
    pub media: bool,
}

/// Capabilities shared by every multimodal Claude model
pub const MULTIMODAL: ModelCapabilities = ModelCapabilities {
    multiturn: true,
    tools: true,
    system_role: true,
    media: true,
};

/// Descriptive metadata stored next to a model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Human readable label
    pub label: String,
    pub supports: ModelCapabilities,
}

/// A registered model
///
/// Cloning is cheap; clones share the underlying function.
#[derive(Clone)]
pub struct Model {
    name: String,
    info: ModelInfo,
    func: ModelFn,
}

impl Model {
    pub fn new(name: impl Into<String>, info: ModelInfo, func: ModelFn) -> Self {
        Self {
            name: name.into(),
            info,
            func,
        }
    }

    /// Qualified name (`provider/model`)
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn info(&self) -> &ModelInfo {
        &self.info
    }

    /// Run the model on a request
    pub async fn generate(
        &self,
        request: GenerateRequest,
        callback: Option<StreamCallback>,
    ) -> Result<GenerateResponse, LlmError> {
        (self.func)(request, callback).await
    }
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("name", &self.name)
            .field("info", &self.info)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::core::types::Message;

    fn echo_model() -> Model {
        let func: ModelFn = Arc::new(
            |request: GenerateRequest, _callback: Option<StreamCallback>| {
                Box::pin(async move {
                    Ok(GenerateResponse {
                        request: Some(request),
                        ..GenerateResponse::default()
                    })
                }) as BoxFuture<'static, Result<GenerateResponse, LlmError>>
            },
        );
        Model::new(
            "test/echo",
            ModelInfo {
                label: "Test - echo".to_string(),
                supports: MULTIMODAL,
            },
            func,
        )
    }

    #[tokio::test]
    async fn test_model_generate_calls_function() {
        let model = echo_model();
        let request = GenerateRequest::new(vec![Message::user("hi")]);

        let response = model.generate(request.clone(), None).await.unwrap();

        assert_eq!(response.request, Some(request));
    }

    #[test]
    fn test_model_debug_omits_function() {
        let debug = format!("{:?}", echo_model());
        assert!(debug.contains("test/echo"));
        assert!(debug.contains("Test - echo"));
    }

    #[test]
    fn test_multimodal_supports_everything() {
        assert!(MULTIMODAL.multiturn);
        assert!(MULTIMODAL.tools);
        assert!(MULTIMODAL.system_role);
        assert!(MULTIMODAL.media);
    }
}
