//! Main authentication service implementation

use std::sync::Arc;

use chrono::Utc;
use lg_shared::validation::{is_valid_email, normalize_email, not_empty};
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::domain::entities::verification_code::VerificationCode;
use crate::domain::value_objects::{AuthResponse, AuthenticatedUser};
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::UserRepository;
use crate::services::notification::{EmailServiceTrait, NotificationService};
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;
use super::password::{hash_password, validate_password, verify_password};
use super::types::RegisterUser;

/// Registration, email verification, login, password management and
/// session resolution
pub struct AuthService<U: UserRepository, E: EmailServiceTrait> {
    user_repository: Arc<U>,
    notifications: Arc<NotificationService<E>>,
    token_service: Arc<TokenService>,
    config: AuthServiceConfig,
}

impl<U: UserRepository, E: EmailServiceTrait> AuthService<U, E> {
    pub fn new(
        user_repository: Arc<U>,
        notifications: Arc<NotificationService<E>>,
        token_service: Arc<TokenService>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            notifications,
            token_service,
            config,
        }
    }

    pub fn token_service(&self) -> &TokenService {
        &self.token_service
    }

    fn validated_email(email: &str) -> DomainResult<String> {
        if !not_empty(email) {
            return Err(DomainError::required("email"));
        }
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail.into());
        }
        Ok(normalize_email(email))
    }

    async fn existing_user_by_email(&self, email: &str) -> DomainResult<User> {
        let email = Self::validated_email(email)?;
        self.user_repository
            .find_by_email(&email)
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))
    }

    /// Persist the attempt counter, or the burned code, after a failed check
    async fn record_failed_check(&self, user: User, error: &AuthError) -> DomainResult<()> {
        if *error == AuthError::OtpAttemptsExceeded {
            tracing::warn!(user_id = %user.id, "OTP attempts exhausted, code discarded");
        }
        self.user_repository.update(user).await?;
        Ok(())
    }

    /// Create an unverified account and email its verification code.
    ///
    /// # Errors
    /// * validation errors for missing name, malformed email or short password
    /// * `AuthError::UserAlreadyExists` when the email is registered
    pub async fn register(&self, input: RegisterUser) -> DomainResult<User> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(DomainError::required("name"));
        }
        let email = Self::validated_email(&input.email)?;
        validate_password(&input.password)?;

        if self.user_repository.find_by_email(&email).await?.is_some() {
            return Err(AuthError::UserAlreadyExists.into());
        }

        let password_hash = hash_password(&input.password, self.config.bcrypt_cost)?;
        let mut user = User::new(name.to_string(), email, password_hash, self.config.max_trial_videos);
        user.fresh_or_remedial = input.fresh_or_remedial;
        user.natural_or_social = input.natural_or_social;

        let code = VerificationCode::generate(self.config.otp_expiry_minutes);
        user.set_verification_code(code.clone());

        let user = match self.user_repository.create(user).await {
            Ok(user) => user,
            // Lost a race against a concurrent registration
            Err(DomainError::ValidationErr(ValidationError::DuplicateValue { .. })) => {
                return Err(AuthError::UserAlreadyExists.into())
            }
            Err(e) => return Err(e),
        };

        tracing::info!(user_id = %user.id, "user registered");
        self.notifications
            .send_verification_code(&user, &code, self.config.otp_expiry_minutes)
            .await;

        Ok(user)
    }

    /// Check the emailed code, mark the account verified and open a session
    pub async fn verify_email(&self, email: &str, otp: &str) -> DomainResult<AuthResponse> {
        let mut user = self.existing_user_by_email(email).await?;
        if user.is_verified {
            return Err(AuthError::AlreadyVerified.into());
        }

        if let Err(error) = check_code(&mut user.verification_code, otp, Utc::now()) {
            self.record_failed_check(user, &error).await?;
            return Err(error.into());
        }

        user.mark_verified();
        let user = self.user_repository.update(user).await?;
        tracing::info!(user_id = %user.id, "email verified");

        let session = self.token_service.generate_session(&user)?;
        Ok(AuthResponse::new(user, session))
    }

    /// Issue a fresh verification code to an unverified account
    pub async fn resend_verification_code(&self, email: &str) -> DomainResult<()> {
        let mut user = self.existing_user_by_email(email).await?;
        if user.is_verified {
            return Err(AuthError::AlreadyVerified.into());
        }

        let code = VerificationCode::generate(self.config.otp_expiry_minutes);
        user.set_verification_code(code.clone());
        let user = self.user_repository.update(user).await?;

        self.notifications
            .send_verification_code(&user, &code, self.config.otp_expiry_minutes)
            .await;
        Ok(())
    }

    /// Check credentials and open a session.
    ///
    /// Unknown emails and wrong passwords produce the same error.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResponse> {
        if !not_empty(password) {
            return Err(DomainError::required("password"));
        }
        let email = Self::validated_email(email)?;

        let user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash) {
            tracing::debug!(user_id = %user.id, "login rejected: wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }
        if !user.is_verified {
            return Err(AuthError::EmailNotVerified.into());
        }

        let session = self.token_service.generate_session(&user)?;
        tracing::info!(user_id = %user.id, "user logged in");
        Ok(AuthResponse::new(user, session))
    }

    /// Email a password reset code
    pub async fn request_password_reset(&self, email: &str) -> DomainResult<()> {
        let mut user = self.existing_user_by_email(email).await?;

        let code = VerificationCode::generate(self.config.otp_expiry_minutes);
        user.set_reset_code(code.clone());
        let user = self.user_repository.update(user).await?;

        self.notifications
            .send_password_reset_code(&user, &code, self.config.otp_expiry_minutes)
            .await;
        Ok(())
    }

    /// Check a reset code and open the reset window
    pub async fn verify_password_reset(&self, email: &str, otp: &str) -> DomainResult<()> {
        let mut user = self.existing_user_by_email(email).await?;
        let now = Utc::now();

        if let Err(error) = check_code(&mut user.reset_code, otp, now) {
            self.record_failed_check(user, &error).await?;
            return Err(error.into());
        }

        user.authorize_password_reset(now, self.config.reset_window_minutes);
        self.user_repository.update(user).await?;
        Ok(())
    }

    /// Set a new password inside an open reset window
    pub async fn reset_password(&self, email: &str, new_password: &str) -> DomainResult<()> {
        let mut user = self.existing_user_by_email(email).await?;
        if !user.can_reset_password_at(Utc::now()) {
            return Err(AuthError::ResetNotAuthorized.into());
        }
        validate_password(new_password)?;

        user.set_password_hash(hash_password(new_password, self.config.bcrypt_cost)?);
        let user = self.user_repository.update(user).await?;
        tracing::info!(user_id = %user.id, "password reset");
        Ok(())
    }

    pub async fn change_password(
        &self,
        user_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        let mut user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !verify_password(current_password, &user.password_hash) {
            return Err(AuthError::IncorrectCurrentPassword.into());
        }
        validate_password(new_password)?;

        user.set_password_hash(hash_password(new_password, self.config.bcrypt_cost)?);
        self.user_repository.update(user).await?;
        Ok(())
    }

    /// Create or promote the bootstrap admin account. Existing accounts keep
    /// their password.
    pub async fn ensure_admin(&self, name: &str, email: &str, password: &str) -> DomainResult<User> {
        let email = Self::validated_email(email)?;

        if let Some(mut user) = self.user_repository.find_by_email(&email).await? {
            if user.is_admin && user.is_verified {
                return Ok(user);
            }
            user.is_admin = true;
            user.mark_verified();
            return self.user_repository.update(user).await;
        }

        validate_password(password)?;
        let password_hash = hash_password(password, self.config.bcrypt_cost)?;
        let mut user = User::new(name.trim().to_string(), email, password_hash, self.config.max_trial_videos);
        user.is_admin = true;
        user.mark_verified();
        let user = self.user_repository.create(user).await?;
        tracing::info!(user_id = %user.id, "bootstrap admin created");
        Ok(user)
    }

    /// Resolve a session token to a live, verified account.
    ///
    /// Admin rights are read from the stored user, not from the token, so a
    /// revoked admin loses access on the next request.
    pub async fn authenticate(&self, token: &str) -> DomainResult<AuthenticatedUser> {
        let claims = self.token_service.verify_session(token)?;
        let user_id = claims.user_id()?;

        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::Unauthenticated)?;

        if !user.is_verified {
            return Err(AuthError::EmailNotVerified.into());
        }

        Ok(AuthenticatedUser {
            user_id: user.id,
            is_admin: user.is_admin,
        })
    }
}

/// Check `otp` against the code in `slot`. A code whose attempts are used up
/// is removed so only a freshly issued one can succeed.
fn check_code(
    slot: &mut Option<VerificationCode>,
    otp: &str,
    now: chrono::DateTime<Utc>,
) -> Result<(), AuthError> {
    let code = slot.as_mut().ok_or(AuthError::InvalidOtp)?;
    let result = code.verify_at(otp, now);
    if code.attempts_exhausted() {
        *slot = None;
    }
    result
}
