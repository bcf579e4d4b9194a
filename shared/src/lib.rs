//! Shared utilities and common types for LearnGate server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structures
//! - Validation helpers (email, password, phone)
//! - Pagination and response bodies

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CorsConfig, DatabaseConfig, EmailConfig, Environment, JwtConfig,
    KeepAliveConfig, LoggingConfig, ServerConfig, SessionConfig, StorageBackend, TrialConfig,
    UploadConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{HealthResponse, MessageResponse, PaginatedResponse, Pagination};
pub use utils::validation;
