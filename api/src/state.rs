//! Application state shared by all handlers

use std::sync::Arc;

use lg_core::repositories::{CourseRepository, UserRepository};
use lg_core::services::auth::{AuthService, AuthServiceConfig};
use lg_core::services::course::CourseService;
use lg_core::services::notification::{EmailServiceTrait, NotificationService};
use lg_core::services::storage::FileStorageTrait;
use lg_core::services::subscription::SubscriptionService;
use lg_core::services::token::{TokenService, TokenServiceConfig};
use lg_core::services::user::UserService;
use lg_shared::{AppConfig, SessionConfig, UploadConfig};

use crate::middleware::auth::{JwtAuth, SessionVerifier};

/// Services and settings handed to every handler through `web::Data`
pub struct AppState<U, C, E, F>
where
    U: UserRepository,
    C: CourseRepository,
    E: EmailServiceTrait,
    F: FileStorageTrait,
{
    pub auth_service: Arc<AuthService<U, E>>,
    pub user_service: UserService<U>,
    pub subscription_service: SubscriptionService<U, E>,
    pub course_service: CourseService<C>,
    pub storage: Arc<F>,
    pub upload: UploadConfig,
    pub session: SessionConfig,
    /// Name of the storage backend, reported by `/health`
    pub storage_backend: String,
}

impl<U, C, E, F> AppState<U, C, E, F>
where
    U: UserRepository + 'static,
    C: CourseRepository + 'static,
    E: EmailServiceTrait + 'static,
    F: FileStorageTrait + 'static,
{
    pub fn new(
        config: &AppConfig,
        user_repository: Arc<U>,
        course_repository: Arc<C>,
        email_service: Arc<E>,
        storage: Arc<F>,
        storage_backend: impl Into<String>,
    ) -> Self {
        let notifications = Arc::new(NotificationService::new(email_service, config.email.app_name.clone()));
        let token_service = Arc::new(TokenService::new(TokenServiceConfig::from(&config.auth.jwt)));
        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&user_repository),
            Arc::clone(&notifications),
            token_service,
            AuthServiceConfig::from_config(&config.auth, &config.trial),
        ));

        Self {
            auth_service,
            user_service: UserService::new(Arc::clone(&user_repository)),
            subscription_service: SubscriptionService::new(user_repository, notifications),
            course_service: CourseService::new(course_repository),
            storage,
            upload: config.upload.clone(),
            session: config.auth.session.clone(),
            storage_backend: storage_backend.into(),
        }
    }

    pub fn session_verifier(&self) -> Arc<dyn SessionVerifier> {
        self.auth_service.clone()
    }

    /// Middleware guarding authenticated routes
    pub fn jwt_auth(&self) -> JwtAuth {
        JwtAuth::new(self.session_verifier(), &self.session.cookie_name)
    }
}
