use anyhow::{Context, Result};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_COHERE_BASE_URL: &str = "https://api.cohere.com";

/// Application configuration loaded from environment variables.
/// Read once at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    /// Empty when `COHERE_API_KEY` is unset; every provider call then falls back.
    pub cohere_api_key: String,
    pub cohere_base_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            cohere_api_key: optional_env("COHERE_API_KEY").unwrap_or_default(),
            cohere_base_url: optional_env("COHERE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_COHERE_BASE_URL.to_string()),
            port: parse_port(optional_env("PORT").as_deref())?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

/// Returns the variable's value, treating an empty string the same as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_port(raw: Option<&str>) -> Result<u16> {
    match raw {
        None => Ok(DEFAULT_PORT),
        Some(value) => value
            .trim()
            .parse::<u16>()
            .with_context(|| format!("PORT must be a valid port number, got '{value}'")),
    }
}
