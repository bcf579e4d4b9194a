//! Signed-in account reads and self-service updates

use actix_web::{web, HttpResponse};

use lg_core::repositories::{CourseRepository, UserRepository};
use lg_core::services::notification::EmailServiceTrait;
use lg_core::services::storage::FileStorageTrait;
use lg_core::services::user::ProfileUpdate;
use lg_shared::MessageResponse;

use crate::dto::{ChangePasswordRequest, UpdateProfileRequest, UserResponse};
use crate::handlers::{parse_id, validate, ApiResult};
use crate::middleware::AuthContext;
use crate::routes::parse_optional;
use crate::state::AppState;

/// Handler for GET /api/users/me
pub async fn me<U, C, E, F>(state: web::Data<AppState<U, C, E, F>>, auth: AuthContext) -> ApiResult
where
    U: UserRepository + 'static,
    C: CourseRepository + 'static,
    E: EmailServiceTrait + 'static,
    F: FileStorageTrait + 'static,
{
    let user = state.user_service.get_user(auth.user_id).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(&user)))
}

/// Handler for GET /api/users/{id}
pub async fn get_user<U, C, E, F>(
    state: web::Data<AppState<U, C, E, F>>,
    auth: AuthContext,
    path: web::Path<String>,
) -> ApiResult
where
    U: UserRepository + 'static,
    C: CourseRepository + 'static,
    E: EmailServiceTrait + 'static,
    F: FileStorageTrait + 'static,
{
    let user_id = parse_id(&path)?;
    auth.ensure_can_access(user_id)?;

    let user = state.user_service.get_user(user_id).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(&user)))
}

/// Handler for PUT /api/users/{id}/profile
pub async fn update_profile<U, C, E, F>(
    state: web::Data<AppState<U, C, E, F>>,
    auth: AuthContext,
    path: web::Path<String>,
    request: web::Json<UpdateProfileRequest>,
) -> ApiResult
where
    U: UserRepository + 'static,
    C: CourseRepository + 'static,
    E: EmailServiceTrait + 'static,
    F: FileStorageTrait + 'static,
{
    let user_id = parse_id(&path)?;
    auth.ensure_can_access(user_id)?;
    validate(&request.0)?;

    let update = ProfileUpdate {
        name: request.name.clone(),
        fresh_or_remedial: parse_optional(request.fresh_or_remedial.as_deref())?,
        natural_or_social: parse_optional(request.natural_or_social.as_deref())?,
    };

    let user = state.user_service.update_profile(user_id, update).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(&user)))
}

/// Handler for PUT /api/users/{id}/password
pub async fn change_password<U, C, E, F>(
    state: web::Data<AppState<U, C, E, F>>,
    auth: AuthContext,
    path: web::Path<String>,
    request: web::Json<ChangePasswordRequest>,
) -> ApiResult
where
    U: UserRepository + 'static,
    C: CourseRepository + 'static,
    E: EmailServiceTrait + 'static,
    F: FileStorageTrait + 'static,
{
    let user_id = parse_id(&path)?;
    auth.ensure_can_access(user_id)?;
    validate(&request.0)?;

    state
        .auth_service
        .change_password(user_id, &request.current_password, &request.new_password)
        .await?;
    log::info!("Password changed for user {}", user_id);
    Ok(HttpResponse::Ok().json(MessageResponse::new("Password updated successfully")))
}
