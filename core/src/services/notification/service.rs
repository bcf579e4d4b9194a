//! Notification service: renders emails and hands them to the provider.
//!
//! Delivery failures are logged and swallowed; no caller ever fails because
//! an email could not be sent.

use std::sync::Arc;

use crate::domain::entities::user::{SubscriptionStatus, User};
use crate::domain::entities::verification_code::VerificationCode;

use super::templates;
use super::traits::{EmailMessage, EmailServiceTrait};

pub struct NotificationService<E: EmailServiceTrait> {
    email_service: Arc<E>,
    app_name: String,
}

impl<E: EmailServiceTrait> NotificationService<E> {
    pub fn new(email_service: Arc<E>, app_name: impl Into<String>) -> Self {
        Self {
            email_service,
            app_name: app_name.into(),
        }
    }

    /// Returns whether the provider accepted the message
    async fn deliver(&self, kind: &'static str, message: EmailMessage) -> bool {
        match self.email_service.send_email(&message).await {
            Ok(message_id) => {
                tracing::info!(kind, to = %message.to, %message_id, "email sent");
                true
            }
            Err(error) => {
                tracing::warn!(kind, to = %message.to, %error, "email delivery failed");
                false
            }
        }
    }

    pub async fn send_verification_code(&self, user: &User, code: &VerificationCode, minutes: i64) -> bool {
        let message = templates::verification_code(&self.app_name, &user.email, &user.name, &code.code, minutes);
        self.deliver("verification_code", message).await
    }

    pub async fn send_password_reset_code(&self, user: &User, code: &VerificationCode, minutes: i64) -> bool {
        let message = templates::password_reset_code(&self.app_name, &user.email, &user.name, &code.code, minutes);
        self.deliver("password_reset_code", message).await
    }

    pub async fn send_subscription_update(&self, user: &User, status: SubscriptionStatus) -> bool {
        let message = templates::subscription_update(&self.app_name, &user.email, &user.name, status);
        self.deliver("subscription_update", message).await
    }
}
