//! Account reads and profile updates

use std::sync::Arc;

use lg_shared::{PaginatedResponse, Pagination};
use uuid::Uuid;

use crate::domain::entities::user::{Stream, Track, User};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::UserRepository;

/// Profile fields a user may change; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub fresh_or_remedial: Option<Track>,
    pub natural_or_social: Option<Stream>,
}

pub struct UserService<U: UserRepository> {
    user_repository: Arc<U>,
}

impl<U: UserRepository> UserService<U> {
    pub fn new(user_repository: Arc<U>) -> Self {
        Self { user_repository }
    }

    pub async fn get_user(&self, id: Uuid) -> DomainResult<User> {
        self.user_repository
            .find_by_id(id)
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))
    }

    /// Admin listing with optional name/email search
    pub async fn list_users(
        &self,
        search: Option<&str>,
        pagination: Pagination,
    ) -> DomainResult<PaginatedResponse<User>> {
        let pagination = pagination.validate();
        let (users, total) = self.user_repository.list(search, pagination).await?;
        Ok(PaginatedResponse::new(users, pagination, total))
    }

    pub async fn update_profile(&self, id: Uuid, update: ProfileUpdate) -> DomainResult<User> {
        let mut user = self.get_user(id).await?;

        let name = match update.name {
            Some(name) if name.trim().is_empty() => return Err(DomainError::required("name")),
            Some(name) => Some(name.trim().to_string()),
            None => None,
        };

        user.update_profile(name, update.fresh_or_remedial, update.natural_or_social);
        self.user_repository.update(user).await
    }
}
