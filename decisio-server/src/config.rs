//! Environment-driven service configuration.

use decisio_core::EngineError;
use secrecy::SecretString;

pub const DEFAULT_BASE_URL: &str = "https://api.perplexity.ai";
pub const DEFAULT_MODEL: &str = "sonar";

/// Connection settings for the upstream chat-completions API.
#[derive(Debug)]
pub struct UpstreamConfig {
    pub api_key: SecretString,
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
}

/// Full service configuration.
#[derive(Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Pacing delay between the initial status event and the upstream
    /// call, in milliseconds. Zero disables it.
    pub stream_delay_ms: u64,
    /// Whether client-facing error events carry a masked message instead
    /// of upstream detail.
    pub mask_errors: bool,
    pub upstream: UpstreamConfig,
}

impl ServerConfig {
    /// Load configuration from `DECISIO_*` environment variables.
    ///
    /// Only the API key is required; everything else has a default.
    pub fn from_env() -> Result<Self, EngineError> {
        let api_key = read_env("DECISIO_API_KEY").ok_or_else(|| {
            EngineError::ConfigurationError(
                "API key is required (missing DECISIO_API_KEY)".to_string(),
            )
        })?;

        Ok(Self {
            host: read_env("DECISIO_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_env("DECISIO_PORT", 8000)?,
            stream_delay_ms: parse_env("DECISIO_STREAM_DELAY_MS", 0)?,
            mask_errors: parse_env("DECISIO_MASK_ERRORS", true)?,
            upstream: UpstreamConfig {
                api_key: SecretString::from(api_key),
                base_url: read_env("DECISIO_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                model: read_env("DECISIO_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                temperature: parse_env("DECISIO_TEMPERATURE", 0.3)?,
            },
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn read_env(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T, EngineError> {
    match read_env(key) {
        Some(raw) => raw.trim().parse().map_err(|_| {
            EngineError::ConfigurationError(format!("invalid value for {key}: {raw:?}"))
        }),
        None => Ok(default),
    }
}
