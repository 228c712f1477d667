//! Site API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. Every default that is used gets logged at startup.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use taraang_core::OPERATOR_EMAIL;

/// Site API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// HTTP listen port
    pub port: u16,

    /// SQLite file holding contact submissions
    pub database_path: String,

    /// Chat-completions endpoint of the hosted language model
    pub llm_endpoint: String,

    /// Bearer token for the language model (optional for local gateways)
    pub llm_api_key: Option<String>,

    /// Model name sent with every completion request
    pub llm_model: String,

    /// Upstream timeout in seconds for model and relay calls
    pub upstream_timeout_secs: u64,

    /// HTTP mail relay accepting `{from, to, reply_to, subject, html}`
    pub mail_relay_url: String,

    /// Sender address on operator notifications
    pub mail_from: String,

    /// Recipient of operator notifications
    pub operator_email: String,
}

impl SiteConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = SiteConfig {
            port: var_or("SITE_PORT", "8080")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SITE_PORT".to_string()))?,

            database_path: var_or("DATABASE_PATH", "taraang-site.db"),

            llm_endpoint: var_or(
                "LLM_ENDPOINT",
                "http://localhost:11434/v1/chat/completions",
            ),

            llm_api_key: env::var("LLM_API_KEY").ok().filter(|k| !k.is_empty()),

            llm_model: var_or("LLM_MODEL", "gemini-2.0-flash"),

            upstream_timeout_secs: var_or("UPSTREAM_TIMEOUT_SECS", "20")
                .parse()
                .map_err(|_| ConfigError::InvalidValue("UPSTREAM_TIMEOUT_SECS".to_string()))?,

            mail_relay_url: var_or("MAIL_RELAY_URL", "http://localhost:8025/api/send"),

            mail_from: var_or("MAIL_FROM", OPERATOR_EMAIL),

            operator_email: var_or("OPERATOR_EMAIL", OPERATOR_EMAIL),
        };

        if config.port == 0 {
            return Err(ConfigError::InvalidValue("SITE_PORT".to_string()));
        }
        if config.llm_endpoint.trim().is_empty() {
            return Err(ConfigError::MissingRequired("LLM_ENDPOINT".to_string()));
        }

        Ok(config)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }
}

fn var_or(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => {
            tracing::info!(key, default, "Using default configuration value");
            default.to_string()
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
