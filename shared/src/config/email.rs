//! Outbound email configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// Email provider selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProviderKind {
    /// JSON HTTP API (Resend compatible)
    Http,
    /// Logs recipient and subject instead of sending
    Log,
}

impl std::str::FromStr for EmailProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "http" | "resend" => Ok(EmailProviderKind::Http),
            "log" | "mock" => Ok(EmailProviderKind::Log),
            _ => Err(format!("Invalid email provider: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    pub provider: EmailProviderKind,

    /// Endpoint accepting `{from, to, subject, html, text}` JSON
    pub api_url: String,

    /// Bearer token for the provider
    #[serde(default)]
    pub api_key: Option<String>,

    /// Sender address, e.g. `LearnGate <no-reply@learngate.app>`
    pub from_address: String,

    /// Product name used in subjects and bodies
    pub app_name: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: EmailProviderKind::Log,
            api_url: String::from("https://api.resend.com/emails"),
            api_key: None,
            from_address: String::from("LearnGate <no-reply@learngate.app>"),
            app_name: String::from("LearnGate"),
            timeout_secs: 10,
        }
    }
}

impl EmailConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let api_key = std::env::var("EMAIL_API_KEY").ok().filter(|k| !k.is_empty());
        // A configured key implies the real provider unless told otherwise
        let fallback_provider = if api_key.is_some() {
            EmailProviderKind::Http
        } else {
            defaults.provider
        };

        Self {
            provider: env_or("EMAIL_PROVIDER", fallback_provider),
            api_url: std::env::var("EMAIL_API_URL").unwrap_or(defaults.api_url),
            api_key,
            from_address: std::env::var("EMAIL_FROM").unwrap_or(defaults.from_address),
            app_name: std::env::var("APP_NAME").unwrap_or(defaults.app_name),
            timeout_secs: env_or("EMAIL_TIMEOUT_SECS", defaults.timeout_secs),
        }
    }
}
