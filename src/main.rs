use anyhow::{Context, Result};
use std::io;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod agents;
mod config;
mod products;
mod query_loop;

use agents::{create_model, PromptBuilder};
use config::ModelConfig;
use query_loop::QueryLoop;

#[derive(Error, Debug)]
pub enum ProductQueryError {
    #[error("Invalid product list: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("LLM error: {0}")]
    Model(String),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(String),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Diagnostics go to stderr so the REPL transcript stays clean
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("product_query=warn".parse()?))
        .init();

    let config = ModelConfig::load();
    info!(
        backend = ?config.backend,
        url = %config.url,
        model = %config.model,
        structured_output = config.structured_output,
        "Starting product-query v{}",
        env!("CARGO_PKG_VERSION")
    );

    let model = create_model(&config).context("Failed to initialize language model")?;
    let query_loop =
        QueryLoop::new(model, PromptBuilder::new()).show_raw_output(config.show_raw_output);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    query_loop
        .run(stdin.lock(), &mut stdout)
        .await
        .context("Console I/O failed")?;

    Ok(())
}
