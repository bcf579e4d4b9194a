//! Configuration module with business-specific sub-modules
//!
//! - `auth` - JWT session tokens, session cookie and OTP lifetimes
//! - `database` - Storage backend selection and MySQL pool settings
//! - `email` - Outbound email provider
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server and CORS
//! - `upload` - Image uploads, trial limits and the keep-alive ping

pub mod auth;
pub mod database;
pub mod email;
pub mod environment;
pub mod server;
pub mod upload;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub use auth::{AuthConfig, JwtConfig, SameSitePolicy, SessionConfig};
pub use database::{DatabaseConfig, StorageBackend};
pub use email::{EmailConfig, EmailProviderKind};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::{CorsConfig, ServerConfig};
pub use upload::{KeepAliveConfig, TrialConfig, UploadConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    pub email: EmailConfig,
    pub upload: UploadConfig,
    pub trial: TrialConfig,
    #[serde(default)]
    pub keep_alive: KeepAliveConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig::new("127.0.0.1", 8080),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            cors: CorsConfig::default(),
            email: EmailConfig::default(),
            upload: UploadConfig::default(),
            trial: TrialConfig::default(),
            keep_alive: KeepAliveConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Load configuration from environment
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(environment),
            cors: CorsConfig::from_env(),
            email: EmailConfig::from_env(),
            upload: UploadConfig::from_env(),
            trial: TrialConfig::from_env(),
            keep_alive: KeepAliveConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }
}

/// Parse an environment variable, falling back to `default` when it is
/// missing or malformed.
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}
