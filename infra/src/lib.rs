//! # Infrastructure Layer
//!
//! Concrete implementations of the ports defined in `lg_core`:
//! - **Database**: MySQL repositories using SQLx
//! - **Email**: HTTP email provider, a logging fallback and an in-memory mock
//! - **Storage**: uploaded images on the local filesystem
//! - **Keep-alive**: periodic self ping for hosts that idle free instances
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

use lg_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Email delivery providers
pub mod email;

/// Keep-alive background task
pub mod keepalive;

/// Local file storage for uploads
pub mod storage;

pub use email::{
    create_email_service, EmailProvider, HttpEmailService, LogEmailService, MockEmailService,
};
pub use keepalive::spawn_keep_alive;
pub use storage::LocalFileStorage;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failure
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::Internal {
            message: err.to_string(),
        }
    }
}
