//! Domain-specific error types for authentication, tokens, validation and
//! subscriptions.
//!
//! The `Display` text of each variant is the message returned to API clients.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("User already exists")]
    UserAlreadyExists,

    #[error("User not found")]
    UserNotFound,

    #[error("User already verified")]
    AlreadyVerified,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Please verify your email to proceed")]
    EmailNotVerified,

    #[error("Invalid OTP")]
    InvalidOtp,

    #[error("OTP expired")]
    OtpExpired,

    #[error("Too many incorrect OTP attempts, request a new code")]
    OtpAttemptsExceeded,

    #[error("OTP verification required before resetting the password")]
    ResetNotAuthorized,

    #[error("Current password is incorrect")]
    IncorrectCurrentPassword,

    #[error("Unauthorized")]
    Unauthenticated,

    #[error("Admin access required")]
    AdminRequired,

    #[error("You can only access your own account")]
    AccessDenied,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired or invalid")]
    TokenExpired,

    #[error("Token expired or invalid")]
    InvalidToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    RequiredField { field: String },

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("Invalid phone number format")]
    InvalidPhone,

    #[error("Invalid {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Duplicate field value: {field}")]
    DuplicateValue { field: String },

    #[error("Only JPEG, PNG, or WEBP images are allowed")]
    UnsupportedImageType { content_type: String },

    #[error("File too large: maximum size is {max_bytes} bytes")]
    FileTooLarge { max_bytes: usize },
}

/// Subscription and trial gate errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    #[error("Trial limit reached: {watched} of {max} free videos used. Please subscribe to continue")]
    TrialLimitReached { watched: u32, max: u32 },

    #[error("Subscription is already active")]
    AlreadyActive,

    #[error("Subscription status cannot be set to {status}")]
    UnsupportedTransition { status: String },
}
