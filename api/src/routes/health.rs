use actix_web::{web, HttpResponse};

use lg_core::repositories::{CourseRepository, UserRepository};
use lg_core::services::notification::EmailServiceTrait;
use lg_core::services::storage::FileStorageTrait;
use lg_shared::HealthResponse;

use crate::state::AppState;

/// Handler for GET /health
pub async fn health_check<U, C, E, F>(state: web::Data<AppState<U, C, E, F>>) -> HttpResponse
where
    U: UserRepository + 'static,
    C: CourseRepository + 'static,
    E: EmailServiceTrait + 'static,
    F: FileStorageTrait + 'static,
{
    HttpResponse::Ok().json(HealthResponse::healthy(state.storage_backend.clone()))
}
