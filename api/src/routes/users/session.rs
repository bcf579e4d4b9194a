//! Registration, email verification, login/logout and password reset

use actix_web::{web, HttpResponse};

use lg_core::domain::value_objects::AuthResponse;
use lg_core::repositories::{CourseRepository, UserRepository};
use lg_core::services::auth::RegisterUser;
use lg_core::services::notification::EmailServiceTrait;
use lg_core::services::storage::FileStorageTrait;
use lg_shared::{config::SessionConfig, MessageResponse};

use crate::cookies::{clear_session_cookie, session_cookie};
use crate::dto::{
    AuthMessageResponse, EmailRequest, LoginRequest, OtpRequest, RegisterRequest, RegisterResponse,
    ResetPasswordRequest, UserResponse,
};
use crate::handlers::{validate, ApiResult};
use crate::routes::parse_optional;
use crate::state::AppState;

/// `{message, user}` with the session cookie attached
fn session_response(session_config: &SessionConfig, auth: AuthResponse, message: &str) -> HttpResponse {
    let cookie = session_cookie(session_config, &auth.session.token, auth.session.max_age_seconds);
    HttpResponse::Ok().cookie(cookie).json(AuthMessageResponse {
        message: message.to_string(),
        user: UserResponse::from(&auth.user),
    })
}

/// Handler for POST /api/users/register
///
/// Creates an unverified account and emails a six digit code.
///
/// ## Errors
/// - 400 Bad Request: missing fields, malformed email, short password,
///   email already registered
pub async fn register<U, C, E, F>(
    state: web::Data<AppState<U, C, E, F>>,
    request: web::Json<RegisterRequest>,
) -> ApiResult
where
    U: UserRepository + 'static,
    C: CourseRepository + 'static,
    E: EmailServiceTrait + 'static,
    F: FileStorageTrait + 'static,
{
    validate(&request.0)?;
    let request = request.into_inner();

    let input = RegisterUser {
        name: request.name,
        email: request.email,
        password: request.password,
        fresh_or_remedial: parse_optional(request.fresh_or_remedial.as_deref())?,
        natural_or_social: parse_optional(request.natural_or_social.as_deref())?,
    };

    let user = state.auth_service.register(input).await?;
    log::info!("Registered user {}", user.id);

    Ok(HttpResponse::Created().json(RegisterResponse {
        message: "Registration successful. Check your email for the verification code".to_string(),
        email: user.email,
    }))
}

/// Handler for POST /api/users/verify-otp
pub async fn verify_otp<U, C, E, F>(
    state: web::Data<AppState<U, C, E, F>>,
    request: web::Json<OtpRequest>,
) -> ApiResult
where
    U: UserRepository + 'static,
    C: CourseRepository + 'static,
    E: EmailServiceTrait + 'static,
    F: FileStorageTrait + 'static,
{
    validate(&request.0)?;
    let auth = state.auth_service.verify_email(&request.email, &request.otp).await?;
    Ok(session_response(&state.session, auth, "Email verified successfully"))
}

/// Handler for POST /api/users/resend-otp
pub async fn resend_otp<U, C, E, F>(
    state: web::Data<AppState<U, C, E, F>>,
    request: web::Json<EmailRequest>,
) -> ApiResult
where
    U: UserRepository + 'static,
    C: CourseRepository + 'static,
    E: EmailServiceTrait + 'static,
    F: FileStorageTrait + 'static,
{
    validate(&request.0)?;
    state.auth_service.resend_verification_code(&request.email).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("A new verification code has been sent")))
}

/// Handler for POST /api/users/login
///
/// ## Errors
/// - 400 Bad Request: unknown email or wrong password (same message)
/// - 401 Unauthorized: email not verified yet
pub async fn login<U, C, E, F>(
    state: web::Data<AppState<U, C, E, F>>,
    request: web::Json<LoginRequest>,
) -> ApiResult
where
    U: UserRepository + 'static,
    C: CourseRepository + 'static,
    E: EmailServiceTrait + 'static,
    F: FileStorageTrait + 'static,
{
    validate(&request.0)?;
    let auth = state.auth_service.login(&request.email, &request.password).await?;
    Ok(session_response(&state.session, auth, "Login successful"))
}

/// Handler for POST /api/users/logout
pub async fn logout<U, C, E, F>(state: web::Data<AppState<U, C, E, F>>) -> HttpResponse
where
    U: UserRepository + 'static,
    C: CourseRepository + 'static,
    E: EmailServiceTrait + 'static,
    F: FileStorageTrait + 'static,
{
    HttpResponse::Ok()
        .cookie(clear_session_cookie(&state.session))
        .json(MessageResponse::new("Logged out successfully"))
}

/// Handler for POST /api/users/send-otp
pub async fn send_reset_otp<U, C, E, F>(
    state: web::Data<AppState<U, C, E, F>>,
    request: web::Json<EmailRequest>,
) -> ApiResult
where
    U: UserRepository + 'static,
    C: CourseRepository + 'static,
    E: EmailServiceTrait + 'static,
    F: FileStorageTrait + 'static,
{
    validate(&request.0)?;
    state.auth_service.request_password_reset(&request.email).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Password reset code sent to your email")))
}

/// Handler for POST /api/users/verify-otp-reset
pub async fn verify_reset_otp<U, C, E, F>(
    state: web::Data<AppState<U, C, E, F>>,
    request: web::Json<OtpRequest>,
) -> ApiResult
where
    U: UserRepository + 'static,
    C: CourseRepository + 'static,
    E: EmailServiceTrait + 'static,
    F: FileStorageTrait + 'static,
{
    validate(&request.0)?;
    state.auth_service.verify_password_reset(&request.email, &request.otp).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Code verified. You can now reset your password")))
}

/// Handler for POST /api/users/reset-password
pub async fn reset_password<U, C, E, F>(
    state: web::Data<AppState<U, C, E, F>>,
    request: web::Json<ResetPasswordRequest>,
) -> ApiResult
where
    U: UserRepository + 'static,
    C: CourseRepository + 'static,
    E: EmailServiceTrait + 'static,
    F: FileStorageTrait + 'static,
{
    validate(&request.0)?;
    state.auth_service.reset_password(&request.email, &request.new_password).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Password reset successfully")))
}
