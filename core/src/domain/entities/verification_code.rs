//! One-time codes emailed for account verification and password reset.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::AuthError;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for verification codes (10 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 10;

/// Wrong guesses allowed before a code is burned
pub const MAX_FAILED_ATTEMPTS: u32 = 5;

/// A 6-digit code with an expiry instant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode {
    /// The zero padded 6-digit code
    pub code: String,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,

    /// Wrong guesses made against this code
    #[serde(default)]
    pub failed_attempts: u32,
}

impl VerificationCode {
    /// Creates a new random code valid for `expiration_minutes`
    pub fn generate(expiration_minutes: i64) -> Self {
        Self::generate_at(Utc::now(), expiration_minutes)
    }

    pub fn generate_at(now: DateTime<Utc>, expiration_minutes: i64) -> Self {
        Self {
            code: Self::generate_code(),
            expires_at: now + Duration::minutes(expiration_minutes),
            failed_attempts: 0,
        }
    }

    /// Rebuild a stored code
    pub fn from_parts(code: String, expires_at: DateTime<Utc>, failed_attempts: u32) -> Self {
        Self {
            code,
            expires_at,
            failed_attempts,
        }
    }

    fn generate_code() -> String {
        let mut rng = rand::thread_rng();
        let code: u32 = rng.gen_range(0..1_000_000);
        format!("{:06}", code)
    }

    /// A code is still valid at exactly `expires_at`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    pub fn attempts_exhausted(&self) -> bool {
        self.failed_attempts >= MAX_FAILED_ATTEMPTS
    }

    /// Check `input` against this code at instant `now`.
    ///
    /// A mismatch is reported before expiry so a wrong guess never reveals
    /// whether a code is outstanding. Each mismatch is counted; the guess that
    /// uses up the allowance, and every check after it, fails with
    /// `OtpAttemptsExceeded` even when the input is right.
    pub fn verify_at(&mut self, input: &str, now: DateTime<Utc>) -> Result<(), AuthError> {
        if self.attempts_exhausted() {
            return Err(AuthError::OtpAttemptsExceeded);
        }
        let input = input.trim();
        if !constant_time_eq(self.code.as_bytes(), input.as_bytes()) {
            self.failed_attempts += 1;
            if self.attempts_exhausted() {
                return Err(AuthError::OtpAttemptsExceeded);
            }
            return Err(AuthError::InvalidOtp);
        }
        if self.is_expired_at(now) {
            return Err(AuthError::OtpExpired);
        }
        Ok(())
    }

    pub fn verify(&mut self, input: &str) -> Result<(), AuthError> {
        self.verify_at(input, Utc::now())
    }
}
