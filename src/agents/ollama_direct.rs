// Direct Ollama /api/generate implementation, no rig in between
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

use super::{format_param, LanguageModel};
use crate::config::ModelConfig;
use crate::ProductQueryError;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

pub struct OllamaDirectModel {
    endpoint: String,
    model: String,
    temperature: f64,
    format: Option<serde_json::Value>,
    client: reqwest::Client,
}

impl OllamaDirectModel {
    pub fn new(config: &ModelConfig) -> Self {
        let endpoint = format!("{}/api/generate", config.url.trim_end_matches('/'));
        info!(endpoint = %endpoint, model = %config.model, "Creating direct Ollama client");

        Self {
            endpoint,
            model: config.model.clone(),
            temperature: config.temperature,
            format: format_param(config),
            client: reqwest::Client::new(),
        }
    }

    fn request<'a>(&'a self, prompt: &'a str) -> GenerateRequest<'a> {
        GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: self.temperature,
            },
            format: self.format.clone(),
        }
    }
}

#[async_trait]
impl LanguageModel for OllamaDirectModel {
    async fn invoke(&self, prompt: &str) -> Result<String, ProductQueryError> {
        let started = Instant::now();
        let response = self
            .client
            .post(&self.endpoint)
            .json(&self.request(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProductQueryError::Model(format!(
                "Ollama API error ({}): {}",
                status, error_text
            )));
        }

        let body: GenerateResponse = response.json().await?;
        debug!(
            model = %self.model,
            elapsed_ms = started.elapsed().as_millis() as u64,
            chars = body.response.len(),
            "Model replied"
        );
        Ok(body.response)
    }
}
