//! Domain entities representing core business objects.

pub mod course;
pub mod token;
pub mod user;
pub mod verification_code;

// Re-export commonly used types
pub use course::{Chapter, Course, CourseCategory};
pub use token::{Claims, SessionToken, JWT_ISSUER, SESSION_EXPIRY_SECONDS};
pub use user::{
    PaymentDetails, Stream, SubscriptionStatus, Track, User, DEFAULT_MAX_TRIAL_VIDEOS,
};
pub use verification_code::{
    VerificationCode, CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES, MAX_FAILED_ATTEMPTS,
};
