use async_trait::async_trait;

pub mod ollama_agent;
pub mod ollama_direct;
pub mod prompt_builder;

pub use ollama_agent::OllamaAgentModel;
pub use ollama_direct::OllamaDirectModel;
pub use prompt_builder::PromptBuilder;

use crate::config::{Backend, ModelConfig};
use crate::ProductQueryError;

/// Send a prompt, get the model's raw text back. No guarantees about the text.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn invoke(&self, prompt: &str) -> Result<String, ProductQueryError>;
}

#[async_trait]
impl<M: LanguageModel + ?Sized> LanguageModel for Box<M> {
    async fn invoke(&self, prompt: &str) -> Result<String, ProductQueryError> {
        (**self).invoke(prompt).await
    }
}

pub fn create_model(config: &ModelConfig) -> Result<Box<dyn LanguageModel>, ProductQueryError> {
    Ok(match config.backend {
        Backend::Agent => Box::new(OllamaAgentModel::new(config)?),
        Backend::Direct => Box::new(OllamaDirectModel::new(config)),
    })
}

/// Ollama `format` payload, only when structured output is switched on.
pub(crate) fn format_param(config: &ModelConfig) -> Option<serde_json::Value> {
    config
        .structured_output
        .then(crate::products::ProductList::json_schema)
}
