//! bcrypt password hashing

use crate::errors::{DomainError, ValidationError};
use lg_shared::validation::{is_valid_password, MIN_PASSWORD_LENGTH};

pub fn validate_password(password: &str) -> Result<(), DomainError> {
    if is_valid_password(password) {
        Ok(())
    } else {
        Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LENGTH,
        }
        .into())
    }
}

pub fn hash_password(password: &str, cost: u32) -> Result<String, DomainError> {
    bcrypt::hash(password, cost).map_err(|e| DomainError::internal(format!("Password hashing failed: {}", e)))
}

/// A malformed stored hash counts as a mismatch
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("secret123", 4).unwrap();
        assert_ne!(hash, "secret123");
        assert!(verify_password("secret123", &hash));
        assert!(!verify_password("secret124", &hash));
    }

    #[test]
    fn test_corrupt_hash_never_matches() {
        assert!(!verify_password("secret123", "not-a-bcrypt-hash"));
    }

    #[test]
    fn test_password_length_rule() {
        assert!(validate_password("12345").is_err());
        assert!(validate_password("123456").is_ok());
    }
}
