//! Session authentication middleware for protecting API endpoints.
//!
//! The middleware reads the session token from the session cookie, falling
//! back to an `Authorization: Bearer` header, resolves it to a live account
//! and injects an [`AuthContext`] into the request extensions. Admin rights
//! are not checked here; handlers ask for an [`AdminContext`] instead.

use actix_web::{
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use async_trait::async_trait;
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use uuid::Uuid;

use lg_core::domain::value_objects::AuthenticatedUser;
use lg_core::errors::{AuthError, DomainError};
use lg_core::repositories::UserRepository;
use lg_core::services::auth::AuthService;
use lg_core::services::notification::EmailServiceTrait;

use crate::handlers::error::handle_domain_error;

/// Resolves a raw session token to the account it belongs to
#[async_trait]
pub trait SessionVerifier: Send + Sync {
    async fn verify_session(&self, token: &str) -> Result<AuthenticatedUser, DomainError>;
}

#[async_trait]
impl<U, E> SessionVerifier for AuthService<U, E>
where
    U: UserRepository + 'static,
    E: EmailServiceTrait + 'static,
{
    async fn verify_session(&self, token: &str) -> Result<AuthenticatedUser, DomainError> {
        self.authenticate(token).await
    }
}

/// Authenticated caller injected into requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub is_admin: bool,
}

impl AuthContext {
    /// Routes keyed by a user id are open to that user and to admins
    pub fn ensure_can_access(&self, user_id: Uuid) -> Result<(), DomainError> {
        if self.is_admin || self.user_id == user_id {
            Ok(())
        } else {
            Err(AuthError::AccessDenied.into())
        }
    }
}

impl From<AuthenticatedUser> for AuthContext {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            user_id: user.user_id,
            is_admin: user.is_admin,
        }
    }
}

/// Turn a domain error into an actix error carrying the JSON body
pub(crate) fn reject(error: DomainError) -> Error {
    let response = handle_domain_error(&error);
    InternalError::from_response(error.to_string(), response).into()
}

/// Short-circuit with the JSON error body instead of calling the route
fn deny<B>(req: ServiceRequest, error: DomainError) -> ServiceResponse<EitherBody<B>> {
    req.into_response(handle_domain_error(&error)).map_into_right_body()
}

/// Session authentication middleware factory
#[derive(Clone)]
pub struct JwtAuth {
    verifier: Arc<dyn SessionVerifier>,
    cookie_name: Rc<str>,
}

impl JwtAuth {
    pub fn new(verifier: Arc<dyn SessionVerifier>, cookie_name: impl AsRef<str>) -> Self {
        Self {
            verifier,
            cookie_name: Rc::from(cookie_name.as_ref()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            verifier: Arc::clone(&self.verifier),
            cookie_name: Rc::clone(&self.cookie_name),
        }))
    }
}

/// Session authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    verifier: Arc<dyn SessionVerifier>,
    cookie_name: Rc<str>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let verifier = Arc::clone(&self.verifier);
        let token = extract_token(&req, &self.cookie_name);

        Box::pin(async move {
            let token = match token {
                Some(token) => token,
                None => {
                    log::debug!("No session token on {} {}", req.method(), req.path());
                    return Ok(deny(req, AuthError::Unauthenticated.into()));
                }
            };

            let user = match verifier.verify_session(&token).await {
                Ok(user) => user,
                Err(error) => {
                    log::debug!("Session rejected on {}: {}", req.path(), error);
                    return Ok(deny(req, error));
                }
            };

            req.extensions_mut().insert(AuthContext::from(user));
            service.call(req).await.map(ServiceResponse::map_into_left_body)
        })
    }
}

/// Session cookie first, then `Authorization: Bearer`
pub fn extract_token(req: &ServiceRequest, cookie_name: &str) -> Option<String> {
    if let Some(cookie) = req.cookie(cookie_name) {
        let value = cookie.value().trim();
        if !value.is_empty() {
            return Some(value.to_string());
        }
    }
    extract_bearer_token(req)
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .copied()
            .ok_or_else(|| reject(AuthError::Unauthenticated.into()));

        ready(result)
    }
}

/// Extractor that only admits admins
#[derive(Debug, Clone, Copy)]
pub struct AdminContext(pub AuthContext);

impl FromRequest for AdminContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = match req.extensions().get::<AuthContext>().copied() {
            None => Err(reject(AuthError::Unauthenticated.into())),
            Some(auth) if !auth.is_admin => Err(reject(AuthError::AdminRequired.into())),
            Some(auth) => Ok(AdminContext(auth)),
        };
        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{cookie::Cookie, http::StatusCode, test as actix_test, web, App, HttpResponse};

    const LEARNER_TOKEN: &str = "learner-token";
    const ADMIN_TOKEN: &str = "admin-token";

    struct StaticVerifier {
        learner: Uuid,
        admin: Uuid,
    }

    #[async_trait]
    impl SessionVerifier for StaticVerifier {
        async fn verify_session(&self, token: &str) -> Result<AuthenticatedUser, DomainError> {
            match token {
                LEARNER_TOKEN => Ok(AuthenticatedUser { user_id: self.learner, is_admin: false }),
                ADMIN_TOKEN => Ok(AuthenticatedUser { user_id: self.admin, is_admin: true }),
                _ => Err(lg_core::errors::TokenError::InvalidToken.into()),
            }
        }
    }

    fn auth() -> JwtAuth {
        JwtAuth::new(
            Arc::new(StaticVerifier {
                learner: Uuid::new_v4(),
                admin: Uuid::new_v4(),
            }),
            "jwt",
        )
    }

    async fn whoami(auth: AuthContext) -> HttpResponse {
        HttpResponse::Ok().json(serde_json::json!({ "isAdmin": auth.is_admin }))
    }

    async fn admin_only(_admin: AdminContext) -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[test]
    fn test_extract_bearer_token() {
        let req = actix_test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_srv_request();
        assert_eq!(extract_token(&req, "jwt"), Some("test_token_123".to_string()));

        let req_no_bearer = actix_test::TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_srv_request();
        assert_eq!(extract_token(&req_no_bearer, "jwt"), None);

        let req_no_header = actix_test::TestRequest::default().to_srv_request();
        assert_eq!(extract_token(&req_no_header, "jwt"), None);
    }

    #[test]
    fn test_cookie_takes_precedence() {
        let req = actix_test::TestRequest::default()
            .cookie(Cookie::new("jwt", "from-cookie"))
            .insert_header((AUTHORIZATION, "Bearer from-header"))
            .to_srv_request();
        assert_eq!(extract_token(&req, "jwt"), Some("from-cookie".to_string()));

        let other_name = actix_test::TestRequest::default()
            .cookie(Cookie::new("session", "from-cookie"))
            .to_srv_request();
        assert_eq!(extract_token(&other_name, "jwt"), None);
    }

    #[test]
    fn test_ensure_can_access() {
        let me = Uuid::new_v4();
        let learner = AuthContext { user_id: me, is_admin: false };
        assert!(learner.ensure_can_access(me).is_ok());
        assert!(matches!(
            learner.ensure_can_access(Uuid::new_v4()),
            Err(DomainError::Auth(AuthError::AccessDenied))
        ));
    }

    #[actix_web::test]
    async fn test_middleware_rejects_and_admits() {
        let app = actix_test::init_service(
            App::new()
                .route("/me", web::get().to(whoami).wrap(auth()))
                .route("/admin", web::get().to(admin_only).wrap(auth())),
        )
        .await;

        let resp = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/me").to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = actix_test::TestRequest::get()
            .uri("/me")
            .cookie(Cookie::new("jwt", "forged"))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = actix_test::TestRequest::get()
            .uri("/me")
            .cookie(Cookie::new("jwt", LEARNER_TOKEN))
            .to_request();
        let body: serde_json::Value = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["isAdmin"], false);

        let req = actix_test::TestRequest::get()
            .uri("/admin")
            .insert_header((AUTHORIZATION, format!("Bearer {}", LEARNER_TOKEN)))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let req = actix_test::TestRequest::get()
            .uri("/admin")
            .insert_header((AUTHORIZATION, format!("Bearer {}", ADMIN_TOKEN)))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
