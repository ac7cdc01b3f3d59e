//! Claude plugin: model registration and invocation

use std::sync::Arc;

use futures::future::BoxFuture;

use crate::llm::core::{
    error::LlmError,
    provider::{Model, ModelCapabilities, ModelFn, ModelInfo, StreamCallback, MULTIMODAL},
    registry::ModelRegistry,
    types::{GenerateRequest, GenerateResponse, GenerateResponseChunk},
};

use super::config::ClaudeConfig;
use super::mapper::{convert_request, translate_response};
use super::transport::{HttpTransport, Transport};

/// Registry namespace for Claude models
pub const PROVIDER: &str = "anthropic";

const LABEL_PREFIX: &str = "Anthropic";

/// Claude models registered by [`ClaudePlugin::init`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaudeModel {
    Claude35Haiku,
    Claude35Sonnet,
    Claude3Haiku,
    Claude3Sonnet,
    Claude3Opus,
}

impl ClaudeModel {
    pub const ALL: [ClaudeModel; 5] = [
        ClaudeModel::Claude35Haiku,
        ClaudeModel::Claude35Sonnet,
        ClaudeModel::Claude3Haiku,
        ClaudeModel::Claude3Sonnet,
        ClaudeModel::Claude3Opus,
    ];

    /// Get the model identifier string
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaudeModel::Claude35Haiku => "claude-3-5-haiku-20241022",
            ClaudeModel::Claude35Sonnet => "claude-3-5-sonnet-20241022",
            ClaudeModel::Claude3Haiku => "claude-3-haiku-20240307",
            ClaudeModel::Claude3Sonnet => "claude-3-sonnet-20240229",
            ClaudeModel::Claude3Opus => "claude-3-opus-20240229",
        }
    }

    /// Look up a known model by identifier
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == name)
    }

    pub fn capabilities(&self) -> ModelCapabilities {
        MULTIMODAL
    }
}

/// Handle to an initialized Claude plugin
///
/// Every model it registers shares one transport. Initializing twice gives
/// two independent plugins; registering both into the same registry fails
/// with `AlreadyRegistered`.
#[derive(Clone)]
pub struct ClaudePlugin {
    transport: Arc<dyn Transport>,
}

impl ClaudePlugin {
    /// Resolve credentials, build the HTTP transport and register the known models
    ///
    /// # Errors
    ///
    /// Returns `MissingCredential` when no API key is available, or
    /// `AlreadyRegistered` when the registry already holds any Claude model,
    /// in which case nothing is registered.
    pub fn init(config: ClaudeConfig, registry: &mut ModelRegistry) -> Result<Self, LlmError> {
        let api_key = config.resolve_api_key()?;
        let transport = HttpTransport::new(&config, api_key)?;
        Self::with_transport(Arc::new(transport), registry)
    }

    /// Register the known models against a caller-supplied transport
    pub fn with_transport(
        transport: Arc<dyn Transport>,
        registry: &mut ModelRegistry,
    ) -> Result<Self, LlmError> {
        if let Some(taken) = ClaudeModel::ALL
            .into_iter()
            .find(|m| registry.is_registered(PROVIDER, m.as_str()))
        {
            return Err(LlmError::AlreadyRegistered(format!(
                "{}/{}",
                PROVIDER,
                taken.as_str()
            )));
        }

        let plugin = Self { transport };
        for model in ClaudeModel::ALL {
            plugin.register(registry, model.as_str(), model.capabilities())?;
        }
        tracing::debug!(models = ClaudeModel::ALL.len(), "initialized Claude plugin");
        Ok(plugin)
    }

    /// Register an additional model
    ///
    /// Without `capabilities`, the name must be a known model.
    pub fn define_model(
        &self,
        registry: &mut ModelRegistry,
        name: &str,
        capabilities: Option<ModelCapabilities>,
    ) -> Result<Model, LlmError> {
        let capabilities = match capabilities {
            Some(caps) => caps,
            None => ClaudeModel::from_name(name)
                .map(|m| m.capabilities())
                .ok_or_else(|| LlmError::UnknownModelCapabilities(name.to_string()))?,
        };
        self.register(registry, name, capabilities)
    }

    /// Check whether a Claude model is registered
    pub fn is_defined_model(registry: &ModelRegistry, name: &str) -> bool {
        registry.is_registered(PROVIDER, name)
    }

    /// Look up a registered Claude model
    pub fn model(registry: &ModelRegistry, name: &str) -> Option<Model> {
        registry.lookup(PROVIDER, name)
    }

    fn register(
        &self,
        registry: &mut ModelRegistry,
        name: &str,
        capabilities: ModelCapabilities,
    ) -> Result<Model, LlmError> {
        let info = ModelInfo {
            label: format!("{} - {}", LABEL_PREFIX, name),
            supports: capabilities,
        };

        let transport = Arc::clone(&self.transport);
        let model_name = name.to_string();
        let func: ModelFn = Arc::new(move |request: GenerateRequest, callback: Option<StreamCallback>| {
            let transport = Arc::clone(&transport);
            let model_name = model_name.clone();
            Box::pin(async move { generate(transport.as_ref(), &model_name, request, callback).await })
                as BoxFuture<'static, Result<GenerateResponse, LlmError>>
        });

        registry.register(PROVIDER, name, info, func)
    }
}

/// Run one request against Claude
///
/// The request is converted before anything is sent, so conversion errors
/// never reach the transport. Transport errors are returned as-is. The
/// returned response carries `input` as its request. When `callback` is
/// given, each candidate is delivered to it as one chunk.
pub async fn generate(
    transport: &dyn Transport,
    model: &str,
    input: GenerateRequest,
    callback: Option<StreamCallback>,
) -> Result<GenerateResponse, LlmError> {
    let request = convert_request(model, &input)?;
    tracing::debug!(
        model,
        messages = request.messages.len(),
        tools = request.tools.len(),
        "converted request"
    );

    let response = transport.send(request).await?;

    let mut translated = translate_response(response);
    tracing::debug!(
        model,
        candidates = translated.candidates.len(),
        total_tokens = translated.usage.total_tokens,
        "translated response"
    );

    if let Some(callback) = callback {
        for candidate in &translated.candidates {
            callback(GenerateResponseChunk {
                index: candidate.index,
                role: candidate.message.role,
                content: candidate.message.content.clone(),
            })?;
        }
    }

    translated.request = Some(input);
    Ok(translated)
}
