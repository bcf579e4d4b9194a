//! Configuration for the token service

use jsonwebtoken::Algorithm;
use lg_shared::config::JwtConfig;

use crate::domain::entities::token::{JWT_ISSUER, SESSION_EXPIRY_SECONDS};

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// JWT signing algorithm
    pub algorithm: Algorithm,
    /// Expected `iss` claim
    pub issuer: String,
    /// Session lifetime in seconds
    pub session_expiry_seconds: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            algorithm: Algorithm::HS256,
            issuer: JWT_ISSUER.to_string(),
            session_expiry_seconds: SESSION_EXPIRY_SECONDS,
        }
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            jwt_secret: config.secret.clone(),
            algorithm: Algorithm::HS256,
            issuer: config.issuer.clone(),
            session_expiry_seconds: config.expiry_seconds,
        }
    }
}
