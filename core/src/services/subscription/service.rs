//! Trial gate, payment submission and admin review.

use std::sync::Arc;

use chrono::Utc;
use lg_shared::validation::is_valid_phone;
use uuid::Uuid;

use crate::domain::entities::user::{PaymentDetails, SubscriptionStatus, User};
use crate::domain::value_objects::{PaymentStats, TrialViewOutcome};
use crate::errors::{AuthError, DomainError, DomainResult, SubscriptionError, ValidationError};
use crate::repositories::UserRepository;
use crate::services::notification::{EmailServiceTrait, NotificationService};

use super::types::{PaymentMethod, PaymentSubmission};

pub struct SubscriptionService<U: UserRepository, E: EmailServiceTrait> {
    user_repository: Arc<U>,
    notifications: Arc<NotificationService<E>>,
}

impl<U: UserRepository, E: EmailServiceTrait> SubscriptionService<U, E> {
    pub fn new(user_repository: Arc<U>, notifications: Arc<NotificationService<E>>) -> Self {
        Self {
            user_repository,
            notifications,
        }
    }

    async fn user(&self, user_id: Uuid) -> DomainResult<User> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))
    }

    /// Count one chapter view against the free allowance.
    ///
    /// # Errors
    /// * `SubscriptionError::TrialLimitReached` once the allowance is used up
    /// * `AuthError::UserNotFound` for an unknown user
    pub async fn record_video_view(&self, user_id: Uuid) -> DomainResult<TrialViewOutcome> {
        let outcome = self
            .user_repository
            .consume_trial_view(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        match outcome {
            TrialViewOutcome::LimitReached { watched, max } => {
                tracing::debug!(%user_id, watched, max, "trial limit reached");
                Err(SubscriptionError::TrialLimitReached { watched, max }.into())
            }
            outcome => Ok(outcome),
        }
    }

    /// Record a payment receipt and put the account into review.
    ///
    /// A pending submission may be replaced; an active one may not.
    pub async fn submit_payment(&self, user_id: Uuid, submission: PaymentSubmission) -> DomainResult<User> {
        let method: PaymentMethod = submission.method.parse()?;
        if !submission.amount.is_finite() || submission.amount <= 0.0 {
            return Err(ValidationError::InvalidValue {
                field: "paymentAmount".to_string(),
                value: submission.amount.to_string(),
            }
            .into());
        }
        if !is_valid_phone(&submission.payer_phone_number) {
            return Err(ValidationError::InvalidPhone.into());
        }
        if submission.receipt_path.trim().is_empty() {
            return Err(DomainError::required("paymentReceipt"));
        }

        let mut user = self.user(user_id).await?;
        if user.subscription_status.is_active() {
            return Err(SubscriptionError::AlreadyActive.into());
        }

        user.submit_payment(PaymentDetails {
            receipt_path: submission.receipt_path,
            method: method.as_str().to_string(),
            amount: submission.amount,
            payer_phone_number: submission.payer_phone_number.trim().to_string(),
            paid_at: Utc::now(),
        });
        let user = self.user_repository.update(user).await?;
        tracing::info!(user_id = %user.id, method = %method, "payment submitted");
        Ok(user)
    }

    /// Admin decision on a subscription: approve (`active`) or send back to
    /// `trial`.
    pub async fn update_status(
        &self,
        user_id: Uuid,
        status: SubscriptionStatus,
        notify: bool,
    ) -> DomainResult<User> {
        if !matches!(status, SubscriptionStatus::Active | SubscriptionStatus::Trial) {
            return Err(SubscriptionError::UnsupportedTransition {
                status: status.to_string(),
            }
            .into());
        }

        let mut user = self.user(user_id).await?;
        let previous = user.subscription_status;
        user.set_subscription_status(status);
        let user = self.user_repository.update(user).await?;
        tracing::info!(user_id = %user.id, from = %previous, to = %status, "subscription status changed");

        if notify {
            self.notifications.send_subscription_update(&user, status).await;
        }
        Ok(user)
    }

    pub async fn pending_payments(&self) -> DomainResult<Vec<User>> {
        self.user_repository.list_by_status(SubscriptionStatus::Pending).await
    }

    pub async fn payment_stats(&self) -> DomainResult<PaymentStats> {
        let counts = self.user_repository.subscription_counts().await?;
        let revenue = self.user_repository.total_revenue().await?;
        Ok(PaymentStats::from_counts(counts, revenue))
    }
}
