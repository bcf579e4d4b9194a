//! Result of a successful login or email verification.

use uuid::Uuid;

use crate::domain::entities::{SessionToken, User};

/// Authenticated user together with the session that should be set as a
/// cookie.
#[derive(Debug, Clone)]
pub struct AuthResponse {
    pub user: User,
    pub session: SessionToken,
}

impl AuthResponse {
    pub fn new(user: User, session: SessionToken) -> Self {
        Self { user, session }
    }
}

/// Identity resolved from a session token on each authenticated request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub is_admin: bool,
}

impl AuthenticatedUser {
    /// Admins may act on any account, everyone else only on their own
    pub fn can_access(&self, user_id: Uuid) -> bool {
        self.is_admin || self.user_id == user_id
    }
}
