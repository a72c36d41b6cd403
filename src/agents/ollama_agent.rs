// Ollama through a rig-core agent
use async_trait::async_trait;
use rig::{
    agent::Agent,
    client::CompletionClient,
    completion::Prompt,
    providers::ollama,
};
use std::time::Instant;
use tracing::{debug, info};

use super::{format_param, LanguageModel};
use crate::config::ModelConfig;
use crate::ProductQueryError;

pub struct OllamaAgentModel {
    agent: Agent<ollama::CompletionModel>,
    model_name: String,
}

impl OllamaAgentModel {
    pub fn new(config: &ModelConfig) -> Result<Self, ProductQueryError> {
        info!(url = %config.url, model = %config.model, "Creating Ollama agent");

        let client = ollama::Client::builder()
            .base_url(&config.url)
            .build()
            .map_err(|e| {
                ProductQueryError::Config(format!(
                    "Failed to create Ollama client for {}: {}",
                    config.url, e
                ))
            })?;

        let mut builder = client
            .agent(&config.model)
            .temperature(config.temperature);
        if let Some(format) = format_param(config) {
            builder = builder.additional_params(serde_json::json!({ "format": format }));
        }

        Ok(Self {
            agent: builder.build(),
            model_name: config.model.clone(),
        })
    }
}

#[async_trait]
impl LanguageModel for OllamaAgentModel {
    async fn invoke(&self, prompt: &str) -> Result<String, ProductQueryError> {
        let started = Instant::now();
        let reply = self.agent.prompt(prompt).await.map_err(|e| {
            ProductQueryError::Model(format!("Ollama agent error: {} | Model: {}", e, self.model_name))
        })?;

        debug!(
            model = %self.model_name,
            elapsed_ms = started.elapsed().as_millis() as u64,
            chars = reply.len(),
            "Model replied"
        );
        Ok(reply)
    }
}
