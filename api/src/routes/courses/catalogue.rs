//! Catalogue reads for signed-in users. Chapters are listed without their
//! video links.

use actix_web::{web, HttpResponse};

use lg_core::domain::entities::course::CourseCategory;
use lg_core::repositories::{CourseRepository, UserRepository};
use lg_core::services::notification::EmailServiceTrait;
use lg_core::services::storage::FileStorageTrait;
use lg_shared::Pagination;

use crate::dto::{CategoryCountResponse, CourseListResponse, CourseResponse, ListCoursesQuery};
use crate::handlers::{parse_id, ApiResult};
use crate::middleware::AuthContext;
use crate::routes::parse_optional;
use crate::state::AppState;

/// Handler for GET /api/courses
///
/// Query: `page`, `limit`, `category`. Newest courses first.
pub async fn list_courses<U, C, E, F>(
    state: web::Data<AppState<U, C, E, F>>,
    _auth: AuthContext,
    query: web::Query<ListCoursesQuery>,
) -> ApiResult
where
    U: UserRepository + 'static,
    C: CourseRepository + 'static,
    E: EmailServiceTrait + 'static,
    F: FileStorageTrait + 'static,
{
    let category: Option<CourseCategory> = parse_optional(query.category.as_deref())?;
    let pagination = Pagination::from_query(query.page, query.limit);

    let page = state.course_service.list_courses(category, pagination).await?;
    Ok(HttpResponse::Ok().json(CourseListResponse::from(page)))
}

/// Handler for GET /api/courses/count-by-category/{category}
pub async fn count_by_category<U, C, E, F>(
    state: web::Data<AppState<U, C, E, F>>,
    _auth: AuthContext,
    path: web::Path<String>,
) -> ApiResult
where
    U: UserRepository + 'static,
    C: CourseRepository + 'static,
    E: EmailServiceTrait + 'static,
    F: FileStorageTrait + 'static,
{
    let category: CourseCategory = path.parse()?;
    let count = state.course_service.count_by_category(category).await?;
    Ok(HttpResponse::Ok().json(CategoryCountResponse { category, count }))
}

/// Handler for GET /api/courses/{id}
pub async fn get_course<U, C, E, F>(
    state: web::Data<AppState<U, C, E, F>>,
    _auth: AuthContext,
    path: web::Path<String>,
) -> ApiResult
where
    U: UserRepository + 'static,
    C: CourseRepository + 'static,
    E: EmailServiceTrait + 'static,
    F: FileStorageTrait + 'static,
{
    let course_id = parse_id(&path)?;
    let course = state.course_service.get_course(course_id).await?;
    Ok(HttpResponse::Ok().json(CourseResponse::from(&course)))
}
