pub mod auth;
pub mod cors;
pub mod security;

pub use auth::{AdminContext, AuthContext, JwtAuth, SessionVerifier};
pub use cors::create_cors;
pub use security::SecurityMiddleware;
