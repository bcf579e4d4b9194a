//! Admin-only user and payment management

use actix_web::{web, HttpResponse};

use lg_core::domain::entities::user::SubscriptionStatus;
use lg_core::repositories::{CourseRepository, UserRepository};
use lg_core::services::notification::EmailServiceTrait;
use lg_core::services::storage::FileStorageTrait;
use lg_shared::Pagination;

use crate::dto::{ListUsersQuery, PendingPaymentsResponse, SubscriptionUpdateRequest, UserListResponse, UserResponse};
use crate::handlers::{parse_id, ApiResult};
use crate::middleware::AdminContext;
use crate::state::AppState;

/// Handler for GET /api/users
///
/// Query: `searchQuery`, `userPage` or `page`, `limit`
pub async fn list_users<U, C, E, F>(
    state: web::Data<AppState<U, C, E, F>>,
    _admin: AdminContext,
    query: web::Query<ListUsersQuery>,
) -> ApiResult
where
    U: UserRepository + 'static,
    C: CourseRepository + 'static,
    E: EmailServiceTrait + 'static,
    F: FileStorageTrait + 'static,
{
    let pagination = Pagination::from_query(query.user_page.or(query.page), query.limit);
    let search = query.search_query.as_deref().map(str::trim).filter(|s| !s.is_empty());

    let page = state.user_service.list_users(search, pagination).await?;
    Ok(HttpResponse::Ok().json(UserListResponse::from(page)))
}

/// Handler for GET /api/users/payments/pending
pub async fn pending_payments<U, C, E, F>(
    state: web::Data<AppState<U, C, E, F>>,
    _admin: AdminContext,
) -> ApiResult
where
    U: UserRepository + 'static,
    C: CourseRepository + 'static,
    E: EmailServiceTrait + 'static,
    F: FileStorageTrait + 'static,
{
    let users = state.subscription_service.pending_payments().await?;
    Ok(HttpResponse::Ok().json(PendingPaymentsResponse {
        users: users.iter().map(UserResponse::from).collect(),
    }))
}

/// Handler for GET /api/users/dashboard/users-payments
pub async fn payment_stats<U, C, E, F>(
    state: web::Data<AppState<U, C, E, F>>,
    _admin: AdminContext,
) -> ApiResult
where
    U: UserRepository + 'static,
    C: CourseRepository + 'static,
    E: EmailServiceTrait + 'static,
    F: FileStorageTrait + 'static,
{
    let stats = state.subscription_service.payment_stats().await?;
    Ok(HttpResponse::Ok().json(stats))
}

/// Handler for PUT /api/users/{id}/subscription
///
/// Body: `{status | subscriptionStatus, notify?}`. Only `active` and
/// `trial` are accepted.
pub async fn update_subscription<U, C, E, F>(
    state: web::Data<AppState<U, C, E, F>>,
    admin: AdminContext,
    path: web::Path<String>,
    request: web::Json<SubscriptionUpdateRequest>,
) -> ApiResult
where
    U: UserRepository + 'static,
    C: CourseRepository + 'static,
    E: EmailServiceTrait + 'static,
    F: FileStorageTrait + 'static,
{
    let user_id = parse_id(&path)?;
    let status: SubscriptionStatus = request
        .requested_status()
        .ok_or_else(|| lg_core::errors::DomainError::required("status"))?
        .parse()?;

    let user = state
        .subscription_service
        .update_status(user_id, status, request.notify)
        .await?;
    log::info!("Admin {} set subscription of {} to {}", admin.0.user_id, user_id, status);

    Ok(HttpResponse::Ok().json(UserResponse::from(&user)))
}
