//! # LearnGate Core
//!
//! Domain layer for the LearnGate backend: entities, repository interfaces,
//! business services and error types. Nothing in here knows about HTTP or
//! a particular database.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
