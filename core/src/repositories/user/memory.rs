//! In-memory implementation of UserRepository
//!
//! Backs the API when `STORAGE_BACKEND=memory` and the test suites.

use async_trait::async_trait;
use lg_shared::Pagination;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::{SubscriptionStatus, User};
use crate::domain::value_objects::{SubscriptionCounts, TrialViewOutcome};
use crate::errors::DomainError;

use super::trait_::UserRepository;

#[derive(Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn matches_search(user: &User, needle: &str) -> bool {
    user.name.to_lowercase().contains(needle) || user.email.contains(needle)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(DomainError::duplicate("email"));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, mut user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.id != user.id && u.email == user.email) {
            return Err(DomainError::duplicate("email"));
        }
        let stored = users
            .get(&user.id)
            .ok_or_else(|| DomainError::not_found("User"))?;

        // The counter is only written by consume_trial_view
        user.trial_videos_watched = stored.trial_videos_watched;
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn list(
        &self,
        search: Option<&str>,
        pagination: Pagination,
    ) -> Result<(Vec<User>, u64), DomainError> {
        let users = self.users.read().await;
        let needle = search
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        let mut matching: Vec<&User> = users
            .values()
            .filter(|u| needle.as_deref().map_or(true, |n| matches_search(u, n)))
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.email.cmp(&b.email)));

        let total = matching.len() as u64;
        let page = matching
            .into_iter()
            .skip(usize::try_from(pagination.offset()).unwrap_or(usize::MAX))
            .take(pagination.limit() as usize)
            .cloned()
            .collect();

        Ok((page, total))
    }

    async fn list_by_status(&self, status: SubscriptionStatus) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().await;
        let mut matching: Vec<User> = users
            .values()
            .filter(|u| u.subscription_status == status)
            .cloned()
            .collect();
        matching.sort_by_key(|u| (u.payment.as_ref().map(|p| p.paid_at), u.created_at));
        Ok(matching)
    }

    async fn subscription_counts(&self) -> Result<SubscriptionCounts, DomainError> {
        let users = self.users.read().await;
        let mut counts = SubscriptionCounts::default();
        for user in users.values() {
            match user.subscription_status {
                SubscriptionStatus::None => counts.none += 1,
                SubscriptionStatus::Trial => counts.trial += 1,
                SubscriptionStatus::Pending => counts.pending += 1,
                SubscriptionStatus::Active => counts.active += 1,
            }
        }
        Ok(counts)
    }

    async fn total_revenue(&self) -> Result<f64, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .filter(|u| u.subscription_status.is_active())
            .filter_map(|u| u.payment.as_ref().map(|p| p.amount))
            .sum())
    }

    async fn consume_trial_view(&self, id: Uuid) -> Result<Option<TrialViewOutcome>, DomainError> {
        // Check and increment under one write guard
        let mut users = self.users.write().await;
        Ok(users.get_mut(&id).map(User::consume_trial_view))
    }
}
