use std::fmt;

use docqa_core::chat::ChatTurn;
use docqa_core::error::AppError;
use serde::{Deserialize, Serialize};

pub mod gemini;
pub mod groq;
pub mod mistral;

pub use gemini::GeminiChat;
pub use groq::GroqChat;
pub use mistral::MistralChat;

/// Immutable decoding configuration for one registered model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Name shown in the model picker; doubles as the registry key.
    pub display_name: String,
    /// Identifier sent to the backend.
    pub model_id: String,
    pub temperature: f32,
}

impl ModelConfig {
    /// Reference models use the backend model id as the display name.
    pub fn new(name: impl Into<String>, temperature: f32) -> Self {
        let name = name.into();
        Self {
            model_id: name.clone(),
            display_name: name,
            temperature,
        }
    }
}

/// A bound, ready-to-call chat model handle.
pub trait ChatModel {
    fn config(&self) -> &ModelConfig;

    /// Run one completion: the prior conversation turns for continuity, then
    /// the composed retrieval prompt as the final user message.
    fn complete(&self, history: &[ChatTurn], prompt: &str) -> Result<String, AppError>;
}

/// API keys for the hosted backends. A family whose key is absent is simply
/// not registered.
#[derive(Debug, Clone, Default)]
pub struct RegistryCredentials {
    pub groq_api_key: Option<String>,
    pub google_api_key: Option<String>,
    pub mistral_api_key: Option<String>,
}

pub const GROQ_MODELS: [&str; 4] = [
    "llama3-8b-8192",
    "llama-3.1-70b-versatile",
    "llama-3.1-8b-instant",
    "mixtral-8x7b-32768",
];
pub const GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const MISTRAL_MODEL: &str = "mistral-large-latest";

const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Closed set of model handles, bound once at construction and immutable
/// afterwards. Lookup order equals registration order, which is also the
/// presentation order.
#[derive(Default)]
pub struct ModelRegistry {
    models: Vec<Box<dyn ChatModel>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self { models: Vec::new() }
    }

    /// Bind the reference model set for whichever backend families have
    /// credentials.
    pub fn with_default_models(creds: &RegistryCredentials) -> Self {
        let mut registry = Self::new();
        if let Some(key) = creds.groq_api_key.as_deref() {
            for name in GROQ_MODELS {
                registry.register(Box::new(GroqChat::new(
                    key,
                    ModelConfig::new(name, DEFAULT_TEMPERATURE),
                )));
            }
        }
        if let Some(key) = creds.google_api_key.as_deref() {
            registry.register(Box::new(GeminiChat::new(
                key,
                ModelConfig::new(GEMINI_MODEL, DEFAULT_TEMPERATURE),
            )));
        }
        if let Some(key) = creds.mistral_api_key.as_deref() {
            registry.register(Box::new(MistralChat::new(
                key,
                ModelConfig::new(MISTRAL_MODEL, DEFAULT_TEMPERATURE),
            )));
        }
        registry
    }

    pub fn register(&mut self, model: Box<dyn ChatModel>) {
        self.models.push(model);
    }

    /// Model names in registration order, for presentation.
    pub fn list_models(&self) -> Vec<&str> {
        self.models
            .iter()
            .map(|m| m.config().display_name.as_str())
            .collect()
    }

    /// Terminal, user-visible error when the name is absent; never
    /// retryable.
    pub fn get(&self, name: &str) -> Result<&dyn ChatModel, AppError> {
        self.models
            .iter()
            .map(|m| m.as_ref())
            .find(|m| m.config().display_name == name)
            .ok_or_else(|| {
                AppError::new("MODEL_NOT_FOUND", "Selected model is not registered")
                    .with_details(format!("model={name}"))
            })
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("models", &self.list_models())
            .finish()
    }
}
