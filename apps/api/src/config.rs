use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Upper bound on a single feedback generation call.
    pub generation_timeout: Duration,
    /// Idle time after which an interview session is dropped.
    pub session_ttl: Duration,
    pub monitoring_url: Option<String>,
    pub monitoring_token: Option<String>,
    pub guard_config_path: Option<PathBuf>,
    pub question_bank_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let generation_timeout_secs = optional("GENERATION_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".to_string())
            .parse::<u64>()
            .context("GENERATION_TIMEOUT_SECS must be a whole number of seconds")?;
        if generation_timeout_secs == 0 {
            anyhow::bail!("GENERATION_TIMEOUT_SECS must be greater than zero");
        }

        let session_ttl_secs = optional("SESSION_TTL_SECS")
            .unwrap_or_else(|| "3600".to_string())
            .parse::<u64>()
            .context("SESSION_TTL_SECS must be a whole number of seconds")?;
        if session_ttl_secs == 0 {
            anyhow::bail!("SESSION_TTL_SECS must be greater than zero");
        }

        Ok(Config {
            anthropic_api_key: optional("ANTHROPIC_API_KEY")
                .context("Required environment variable 'ANTHROPIC_API_KEY' is not set")?,
            port: optional("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            generation_timeout: Duration::from_secs(generation_timeout_secs),
            session_ttl: Duration::from_secs(session_ttl_secs),
            monitoring_url: optional("MONITORING_URL"),
            monitoring_token: optional("MONITORING_TOKEN"),
            guard_config_path: optional("GUARD_CONFIG_PATH").map(PathBuf::from),
            question_bank_path: optional("QUESTION_BANK_PATH").map(PathBuf::from),
        })
    }
}
