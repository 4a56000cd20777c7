use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Collaborator settings are optional: a missing key degrades the
/// corresponding pipeline stage instead of failing startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: Option<String>,
    pub doc_intel_endpoint: Option<String>,
    pub doc_intel_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            groq_api_key: optional_env("GROQ_API_KEY"),
            doc_intel_endpoint: optional_env("DOC_INTEL_ENDPOINT"),
            doc_intel_key: optional_env("DOC_INTEL_KEY"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads an optional variable, treating empty strings as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// A credential copied straight from a setup template has not been filled in.
pub fn is_placeholder_credential(key: &str) -> bool {
    key.trim().is_empty() || key.contains("YOUR-KEY")
}
