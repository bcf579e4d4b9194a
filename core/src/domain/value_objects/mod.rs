//! Value objects representing immutable domain concepts.

pub mod access;
pub mod auth_response;
pub mod upload;

// Re-export commonly used types
pub use access::{PaymentStats, SubscriptionCounts, TrialViewOutcome};
pub use auth_response::{AuthResponse, AuthenticatedUser};
pub use upload::{ImageUpload, StoredFile, ALLOWED_IMAGE_TYPES};
