use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_FILTER_DEBOUNCE_MS: u64 = 300;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Client configuration loaded from environment variables.
/// Every variable is optional; defaults target a screening API on localhost.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub filter_debounce: Duration,
    pub http_timeout: Duration,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_url: std::env::var("SCREENER_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            filter_debounce: Duration::from_millis(optional_u64(
                "SCREENER_FILTER_DEBOUNCE_MS",
                DEFAULT_FILTER_DEBOUNCE_MS,
            )?),
            http_timeout: Duration::from_secs(optional_u64(
                "SCREENER_HTTP_TIMEOUT_SECS",
                DEFAULT_HTTP_TIMEOUT_SECS,
            )?),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Replaces the API base URL, e.g. from a `--api-url` flag.
    pub fn with_api_url(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url {
            self.api_url = url;
        }
        self
    }
}

fn optional_u64(key: &str, default: u64) -> Result<u64> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .with_context(|| format!("{key} must be a non-negative integer, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
