use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "llama3.2";

pub const URL_ENV: &str = "OLLAMA_URL";
pub const MODEL_ENV: &str = "PRODUCT_QUERY_MODEL";

/// Which client carries prompts to Ollama.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// rig-core agent
    #[default]
    Agent,
    /// Plain HTTP call to `/api/generate`
    Direct,
}

/// On-disk shape of `config.json`; every field is optional.
#[derive(Debug, Default, Serialize, Deserialize)]
struct FileConfig {
    backend: Option<Backend>,
    url: Option<String>,
    model: Option<String>,
    temperature: Option<f64>,
    structured_output: Option<bool>,
    show_raw_output: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub backend: Backend,
    pub url: String,
    pub model: String,
    pub temperature: f64,
    /// Pass the product JSON Schema as Ollama's `format` parameter.
    pub structured_output: bool,
    /// Echo the raw model reply before parsing it.
    pub show_raw_output: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Agent,
            url: DEFAULT_OLLAMA_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.0,
            structured_output: false,
            show_raw_output: true,
        }
    }
}

impl ModelConfig {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join("product-query").join("config.json"))
            .unwrap_or_else(|| PathBuf::from("product_query_config.json"))
    }

    /// Load from the user config dir, falling back to environment then defaults.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path(), |key| env::var(key).ok())
    }

    pub fn load_from<F>(path: &Path, lookup_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<FileConfig>(&content) {
                Ok(config) => {
                    info!(path = %path.display(), "Loaded config file");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Ignoring malformed config file");
                    FileConfig::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "No config file, using environment and defaults");
                FileConfig::default()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not read config file");
                FileConfig::default()
            }
        };

        Self::from_file_config(file, lookup_env)
    }

    fn from_file_config<F>(file: FileConfig, lookup_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            backend: file.backend.unwrap_or(defaults.backend),
            url: file
                .url
                .or_else(|| lookup_env(URL_ENV))
                .unwrap_or(defaults.url),
            model: file
                .model
                .or_else(|| lookup_env(MODEL_ENV))
                .unwrap_or(defaults.model),
            temperature: file.temperature.unwrap_or(defaults.temperature),
            structured_output: file.structured_output.unwrap_or(defaults.structured_output),
            show_raw_output: file.show_raw_output.unwrap_or(defaults.show_raw_output),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("config.json");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ModelConfig::load_from(&dir.path().join("absent.json"), no_env);
        assert_eq!(config, ModelConfig::default());
        assert_eq!(config.model, "llama3.2");
        assert_eq!(config.temperature, 0.0);
        assert!(config.show_raw_output);
    }

    #[test]
    fn test_file_values_override_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"{"backend": "direct", "url": "http://gpu-box:11434", "model": "qwen2.5:7b",
                "temperature": 0.2, "structured_output": true, "show_raw_output": false}"#,
        );
        let config = ModelConfig::load_from(&path, no_env);
        assert_eq!(config.backend, Backend::Direct);
        assert_eq!(config.url, "http://gpu-box:11434");
        assert_eq!(config.model, "qwen2.5:7b");
        assert_eq!(config.temperature, 0.2);
        assert!(config.structured_output);
        assert!(!config.show_raw_output);
    }

    #[test]
    fn test_env_fills_fields_missing_from_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"{"model": "mistral"}"#);
        let env: HashMap<&str, &str> =
            HashMap::from([(URL_ENV, "http://10.0.0.5:11434"), (MODEL_ENV, "ignored")]);
        let config = ModelConfig::load_from(&path, |key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.url, "http://10.0.0.5:11434");
        assert_eq!(config.model, "mistral");
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "{ model: llama3.2");
        let config = ModelConfig::load_from(&path, |key| {
            (key == MODEL_ENV).then(|| "phi3".to_string())
        });
        assert_eq!(config.model, "phi3");
        assert_eq!(config.url, DEFAULT_OLLAMA_URL);
    }

    #[test]
    fn test_unknown_backend_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"{"backend": "gemini"}"#);
        assert_eq!(ModelConfig::load_from(&path, no_env).backend, Backend::Agent);
    }
}
