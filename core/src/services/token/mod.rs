//! Token service module for JWT session management

mod config;
mod service;


pub use config::TokenServiceConfig;
pub use service::TokenService;
