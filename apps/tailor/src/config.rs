use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Client configuration loaded from environment variables.
/// Every variable is optional; malformed numbers are a startup error.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub http_timeout: Duration,
    /// How long the copy button shows its "copied" label.
    pub copy_reset: Duration,
    pub output_dir: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Config {
            api_url: lookup("TAILOR_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            http_timeout: Duration::from_secs(parse_or(&lookup, "TAILOR_HTTP_TIMEOUT_SECS", 120)?),
            copy_reset: Duration::from_millis(parse_or(&lookup, "TAILOR_COPY_RESET_MS", 2000)?),
            output_dir: lookup("TAILOR_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_or(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> Result<u64> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .with_context(|| format!("{key} must be a non-negative integer, got '{raw}'")),
        None => Ok(default),
    }
}
