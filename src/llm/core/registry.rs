//! Registry of named models

use std::collections::HashMap;

use super::error::LlmError;
use super::provider::{Model, ModelFn, ModelInfo};

/// Registry mapping qualified model names to callable models
///
/// Models are keyed by `provider/name`. Registration needs `&mut self`, so
/// population happens before the registry is shared; lookups hand out
/// clones that can be used from any task.
///
/// # Example
///
/// ```ignore
/// let mut registry = ModelRegistry::new();
/// let plugin = ClaudePlugin::init(ClaudeConfig::new(), &mut registry)?;
///
/// let model = registry.lookup("anthropic", "claude-3-5-sonnet-20241022").unwrap();
/// let response = model.generate(request, None).await?;
/// ```
#[derive(Debug, Default)]
pub struct ModelRegistry {
    models: HashMap<String, Model>,
}

impl ModelRegistry {
    /// Create a new empty model registry
    pub fn new() -> Self {
        Self {
            models: HashMap::new(),
        }
    }

    /// Register a model under `provider/name`
    ///
    /// # Errors
    ///
    /// Returns `AlreadyRegistered` if the qualified name is taken.
    pub fn register(
        &mut self,
        provider: &str,
        name: &str,
        info: ModelInfo,
        func: ModelFn,
    ) -> Result<Model, LlmError> {
        let key = qualified_name(provider, name);
        if self.models.contains_key(&key) {
            return Err(LlmError::AlreadyRegistered(key));
        }

        let model = Model::new(key.clone(), info, func);
        self.models.insert(key, model.clone());
        tracing::debug!(model = model.name(), "registered model");
        Ok(model)
    }

    /// Look up a registered model
    pub fn lookup(&self, provider: &str, name: &str) -> Option<Model> {
        self.models.get(&qualified_name(provider, name)).cloned()
    }

    /// Check if a model is registered
    pub fn is_registered(&self, provider: &str, name: &str) -> bool {
        self.models.contains_key(&qualified_name(provider, name))
    }

    /// Qualified names of every registered model, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.models.keys().cloned().collect();
        names.sort();
        names
    }

    /// Get the number of registered models
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

fn qualified_name(provider: &str, name: &str) -> String {
    format!("{}/{}", provider, name)
}
