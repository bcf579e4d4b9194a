//! Authentication and session configuration

use serde::{Deserialize, Serialize};

use super::environment::Environment;
use super::env_or;

const DEFAULT_SECRET: &str = "your-secret-key-change-in-production";

/// JWT session token configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub secret: String,

    /// Session token lifetime in seconds
    pub expiry_seconds: i64,

    /// JWT issuer claim
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            expiry_seconds: 86_400, // 1 day
            issuer: String::from("learngate"),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set the session lifetime in seconds
    pub fn with_expiry_seconds(mut self, seconds: i64) -> Self {
        self.expiry_seconds = seconds;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            secret: std::env::var("JWT_SECRET").unwrap_or(defaults.secret),
            expiry_seconds: env_or("JWT_EXPIRY_SECONDS", defaults.expiry_seconds),
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
        }
    }
}

/// SameSite attribute of the session cookie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum SameSitePolicy {
    Strict,
    Lax,
    None,
}

/// Session cookie configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Session cookie name
    pub cookie_name: String,

    /// Session cookie secure flag (HTTPS only)
    pub secure: bool,

    /// Session cookie SameSite attribute
    pub same_site: SameSitePolicy,

    /// Session cookie HttpOnly flag
    #[serde(default = "default_http_only")]
    pub http_only: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: String::from("jwt"),
            secure: false,
            same_site: SameSitePolicy::Lax,
            http_only: default_http_only(),
        }
    }
}

impl SessionConfig {
    /// Cookie flags for the given environment.
    ///
    /// Production serves the client from another origin, so the cookie must
    /// be `SameSite=None; Secure` there.
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self::default(),
            Environment::Staging => Self {
                secure: true,
                ..Default::default()
            },
            Environment::Production => Self {
                secure: true,
                same_site: SameSitePolicy::None,
                ..Default::default()
            },
        }
    }

    pub fn from_env(env: Environment) -> Self {
        let mut config = Self::for_environment(env);
        if let Ok(name) = std::env::var("SESSION_COOKIE_NAME") {
            config.cookie_name = name;
        }
        config
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Session cookie configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Lifetime of emailed one-time codes in minutes
    pub otp_expiry_minutes: i64,

    /// How long a verified reset code authorizes a password change
    pub reset_window_minutes: i64,

    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            session: SessionConfig::default(),
            otp_expiry_minutes: 10,
            reset_window_minutes: 10,
            bcrypt_cost: 10,
        }
    }
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env(env: Environment) -> Self {
        let defaults = Self::default();
        Self {
            jwt: JwtConfig::from_env(),
            session: SessionConfig::from_env(env),
            otp_expiry_minutes: env_or("OTP_EXPIRY_MINUTES", defaults.otp_expiry_minutes),
            reset_window_minutes: env_or("RESET_WINDOW_MINUTES", defaults.reset_window_minutes),
            bcrypt_cost: env_or("BCRYPT_COST", defaults.bcrypt_cost),
        }
    }
}

fn default_http_only() -> bool {
    true
}
