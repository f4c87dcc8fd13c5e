use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every path has a default pointing into `data/`, so a bare checkout starts.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub communication_bank_path: PathBuf,
    pub technical_bank_path: PathBuf,
    pub communication_model_path: PathBuf,
    /// Without a complexity model every prediction takes the fallback rule.
    pub complexity_model_path: Option<PathBuf>,
    /// Without an embedding server every similarity degrades to zero.
    pub embedding_url: Option<String>,
    pub embedding_model: String,
    pub embedding_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            communication_bank_path: env_or(
                "COMMUNICATION_BANK_PATH",
                "data/softskill_questions.csv",
            )
            .into(),
            technical_bank_path: env_or("TECHNICAL_BANK_PATH", "data/technical_questions.csv")
                .into(),
            communication_model_path: env_or(
                "COMMUNICATION_MODEL_PATH",
                "data/communication_model.json",
            )
            .into(),
            complexity_model_path: optional_env("COMPLEXITY_MODEL_PATH").map(PathBuf::from),
            embedding_url: optional_env("EMBEDDING_URL"),
            embedding_model: env_or("EMBEDDING_MODEL", crate::embedding::DEFAULT_MODEL),
            embedding_timeout_secs: env_or("EMBEDDING_TIMEOUT_SECS", "30")
                .parse::<u64>()
                .context("EMBEDDING_TIMEOUT_SECS must be a whole number of seconds")?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Unset and empty variables are both treated as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
