//! LearnGate HTTP API
//!
//! actix-web application wiring the core services to routes: cookie based
//! sessions, multipart uploads for covers and receipts, and a single
//! domain error to HTTP mapping.

pub mod app;
pub mod cookies;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod upload;

pub use app::{create_app, HttpSettings};
pub use state::AppState;
