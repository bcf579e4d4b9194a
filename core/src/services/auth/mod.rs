//! Authentication service module
//!
//! - Registration with emailed one-time code
//! - Email verification and login issuing session tokens
//! - Password reset by code and password change
//! - Resolving session tokens on authenticated requests

mod config;
mod password;
mod service;
mod types;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use password::{hash_password, verify_password};
pub use service::AuthService;
pub use types::RegisterUser;
