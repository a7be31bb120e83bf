use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

pub const DEFAULT_SYNONYM_API_URL: &str = "https://api.datamuse.com/words";
const DEFAULT_SYNONYM_TIMEOUT_MS: u64 = 3000;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub rust_log: String,
    pub synonym_api_url: String,
    pub synonym_timeout: Duration,
    /// `None` keeps every looked-up term for the life of the process.
    pub synonym_cache_capacity: Option<NonZeroUsize>,
    /// JSON file replacing the built-in keyword weight table.
    pub keyword_weights_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let synonym_timeout_ms = match std::env::var("SYNONYM_TIMEOUT_MS") {
            Ok(v) => v
                .parse::<u64>()
                .context("SYNONYM_TIMEOUT_MS must be a number of milliseconds")?,
            Err(_) => DEFAULT_SYNONYM_TIMEOUT_MS,
        };

        let synonym_cache_capacity =
            parse_cache_capacity(std::env::var("SYNONYM_CACHE_CAPACITY").ok().as_deref())?;

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            synonym_api_url: std::env::var("SYNONYM_API_URL")
                .unwrap_or_else(|_| DEFAULT_SYNONYM_API_URL.to_string()),
            synonym_timeout: Duration::from_millis(synonym_timeout_ms),
            synonym_cache_capacity,
            keyword_weights_path: std::env::var("KEYWORD_WEIGHTS_PATH").ok().map(PathBuf::from),
        })
    }
}

/// A capacity of zero would stop failed lookups from being cached, so it is rejected.
fn parse_cache_capacity(raw: Option<&str>) -> Result<Option<NonZeroUsize>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let capacity = raw
        .trim()
        .parse::<usize>()
        .context("SYNONYM_CACHE_CAPACITY must be a positive integer")?;
    match NonZeroUsize::new(capacity) {
        Some(capacity) => Ok(Some(capacity)),
        None => bail!("SYNONYM_CACHE_CAPACITY must be a positive integer, got 0"),
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
