use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::retrieval::RetrievalBackend;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the salary guide JSON file.
    pub salary_guide_path: PathBuf,
    /// Similarity backend, chosen once at startup — never a runtime fallback.
    pub retrieval_backend: RetrievalBackend,
    pub openrouter_api_key: String,
    pub openrouter_base_url: String,
    pub llm_model: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            salary_guide_path: std::env::var("SALARY_GUIDE_PATH")
                .unwrap_or_else(|_| "data/salary_guide_2025.json".to_string())
                .into(),
            retrieval_backend: std::env::var("RETRIEVAL_BACKEND")
                .unwrap_or_else(|_| "tfidf".to_string())
                .parse::<RetrievalBackend>()
                .map_err(anyhow::Error::msg)
                .context("RETRIEVAL_BACKEND must be 'tfidf' or 'overlap'")?,
            openrouter_api_key: require_env("OPENROUTER_API_KEY")?,
            openrouter_base_url: std::env::var("OPENROUTER_BASE_URL")
                .unwrap_or_else(|_| "https://openrouter.ai/api/v1".to_string()),
            llm_model: std::env::var("LLM_MODEL")
                .unwrap_or_else(|_| "qwen/qwen-2.5-72b-instruct".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
