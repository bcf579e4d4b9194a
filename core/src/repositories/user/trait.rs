//! User repository trait defining the interface for user persistence.

use async_trait::async_trait;
use lg_shared::Pagination;
use uuid::Uuid;

use crate::domain::entities::user::{SubscriptionStatus, User};
use crate::domain::value_objects::{SubscriptionCounts, TrialViewOutcome};
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// Implementations own uniqueness of the email column and must make
/// [`UserRepository::consume_trial_view`] atomic: two concurrent views by the
/// same user may never both pass the last free slot.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by normalized (lowercase) email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Insert a new user
    ///
    /// # Errors
    /// * `ValidationError::DuplicateValue { field: "email" }` when the email is taken
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Persist every field of an existing user
    ///
    /// # Errors
    /// * `DomainError::NotFound` when no user has this id
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Page through users, newest first, optionally filtered by a
    /// case-insensitive substring of name or email
    async fn list(
        &self,
        search: Option<&str>,
        pagination: Pagination,
    ) -> Result<(Vec<User>, u64), DomainError>;

    /// All users in the given subscription state, oldest payment first
    async fn list_by_status(&self, status: SubscriptionStatus) -> Result<Vec<User>, DomainError>;

    async fn subscription_counts(&self) -> Result<SubscriptionCounts, DomainError>;

    /// Sum of recorded payment amounts of active subscribers
    async fn total_revenue(&self) -> Result<f64, DomainError>;

    /// Atomically apply the trial gate to one chapter view.
    ///
    /// Returns `Ok(None)` when the user does not exist.
    async fn consume_trial_view(&self, id: Uuid) -> Result<Option<TrialViewOutcome>, DomainError>;
}
