//! Admin course management

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};

use lg_core::domain::entities::course::CourseCategory;
use lg_core::errors::DomainError;
use lg_core::repositories::{CourseRepository, UserRepository};
use lg_core::services::course::{CourseUpdate, NewChapter, NewCourse};
use lg_core::services::notification::EmailServiceTrait;
use lg_core::services::storage::FileStorageTrait;
use lg_shared::MessageResponse;

use crate::dto::{AddChapterRequest, ChapterResponse, CourseResponse};
use crate::handlers::{parse_id, validate, ApiError, ApiResult};
use crate::middleware::AdminContext;
use crate::routes::parse_optional;
use crate::state::AppState;
use crate::upload::{read_multipart, MultipartForm};

const COVER_FIELD: &str = "coverImage";

/// Optional `chapters` field holding a JSON array
fn chapters_field(form: &MultipartForm) -> Result<Option<Vec<NewChapter>>, ApiError> {
    let Some(raw) = form.text("chapters") else {
        return Ok(None);
    };
    let requests: Vec<AddChapterRequest> = serde_json::from_str(raw)
        .map_err(|e| DomainError::validation(format!("Invalid chapters: {}", e)))?;
    for request in &requests {
        validate(request)?;
    }
    Ok(Some(requests.into_iter().map(NewChapter::from).collect()))
}

/// Validate and store the cover, if the form carries one
async fn store_cover<U, C, E, F>(
    state: &AppState<U, C, E, F>,
    form: &mut MultipartForm,
) -> Result<Option<String>, ApiError>
where
    U: UserRepository + 'static,
    C: CourseRepository + 'static,
    E: EmailServiceTrait + 'static,
    F: FileStorageTrait + 'static,
{
    let Some(cover) = form.take_file(COVER_FIELD) else {
        return Ok(None);
    };
    cover.validate(state.upload.max_file_bytes)?;

    let stored = state
        .storage
        .store("course", &cover)
        .await
        .map_err(DomainError::internal)?;
    Ok(Some(stored.public_path))
}

/// Best-effort removal; a leftover file is logged, never fatal
async fn discard_file<F: FileStorageTrait>(storage: &F, public_path: &str) {
    if let Err(error) = storage.remove(public_path).await {
        log::warn!("Could not remove {}: {}", public_path, error);
    }
}

/// Handler for POST /api/courses
///
/// Multipart fields: `title`, `description`, `instructor`, `category`,
/// `coverImage` (required image) and an optional `chapters` JSON array.
pub async fn create_course<U, C, E, F>(
    state: web::Data<AppState<U, C, E, F>>,
    _admin: AdminContext,
    payload: Multipart,
) -> ApiResult
where
    U: UserRepository + 'static,
    C: CourseRepository + 'static,
    E: EmailServiceTrait + 'static,
    F: FileStorageTrait + 'static,
{
    let mut form = read_multipart(payload, state.upload.max_file_bytes).await?;

    let category: CourseCategory = form
        .text("category")
        .ok_or_else(|| DomainError::required("category"))?
        .parse()?;
    let chapters = chapters_field(&form)?.unwrap_or_default();
    if !form.has_file(COVER_FIELD) {
        return Err(DomainError::validation("Cover image is required").into());
    }

    let cover = store_cover(state.get_ref(), &mut form).await?;
    let input = NewCourse {
        title: form.text("title").unwrap_or_default().to_string(),
        description: form.text("description").unwrap_or_default().to_string(),
        instructor: form.text("instructor").unwrap_or_default().to_string(),
        category,
        cover_image_url: cover.clone(),
        chapters,
    };

    match state.course_service.create_course(input).await {
        Ok(course) => Ok(HttpResponse::Created().json(CourseResponse::from(&course))),
        Err(error) => {
            if let Some(cover) = cover {
                discard_file(state.storage.as_ref(), &cover).await;
            }
            Err(error.into())
        }
    }
}

/// Handler for PUT /api/courses/{id}
///
/// Same fields as creation, all optional. A new cover replaces the old file;
/// `chapters`, when present, replaces the whole chapter list.
pub async fn update_course<U, C, E, F>(
    state: web::Data<AppState<U, C, E, F>>,
    _admin: AdminContext,
    path: web::Path<String>,
    payload: Multipart,
) -> ApiResult
where
    U: UserRepository + 'static,
    C: CourseRepository + 'static,
    E: EmailServiceTrait + 'static,
    F: FileStorageTrait + 'static,
{
    let course_id = parse_id(&path)?;
    let mut form = read_multipart(payload, state.upload.max_file_bytes).await?;

    let category: Option<CourseCategory> = parse_optional(form.text("category"))?;
    let chapters = chapters_field(&form)?;
    let cover = store_cover(state.get_ref(), &mut form).await?;

    let update = CourseUpdate {
        title: form.text("title").map(str::to_string),
        description: form.text("description").map(str::to_string),
        instructor: form.text("instructor").map(str::to_string),
        category,
        cover_image_url: cover.clone(),
        chapters,
    };

    match state.course_service.update_course(course_id, update).await {
        Ok((course, replaced_cover)) => {
            if let Some(old) = replaced_cover {
                discard_file(state.storage.as_ref(), &old).await;
            }
            Ok(HttpResponse::Ok().json(CourseResponse::from(&course)))
        }
        Err(error) => {
            if let Some(cover) = cover {
                discard_file(state.storage.as_ref(), &cover).await;
            }
            Err(error.into())
        }
    }
}

/// Handler for DELETE /api/courses/{id}
pub async fn delete_course<U, C, E, F>(
    state: web::Data<AppState<U, C, E, F>>,
    _admin: AdminContext,
    path: web::Path<String>,
) -> ApiResult
where
    U: UserRepository + 'static,
    C: CourseRepository + 'static,
    E: EmailServiceTrait + 'static,
    F: FileStorageTrait + 'static,
{
    let course_id = parse_id(&path)?;
    let course = state.course_service.delete_course(course_id).await?;
    discard_file(state.storage.as_ref(), &course.cover_image_url).await;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Course deleted successfully")))
}

/// Handler for POST /api/courses/{id}/chapters
pub async fn add_chapter<U, C, E, F>(
    state: web::Data<AppState<U, C, E, F>>,
    _admin: AdminContext,
    path: web::Path<String>,
    request: web::Json<AddChapterRequest>,
) -> ApiResult
where
    U: UserRepository + 'static,
    C: CourseRepository + 'static,
    E: EmailServiceTrait + 'static,
    F: FileStorageTrait + 'static,
{
    let course_id = parse_id(&path)?;
    validate(&request.0)?;

    let chapter = state
        .course_service
        .add_chapter(course_id, NewChapter::from(request.into_inner()))
        .await?;
    Ok(HttpResponse::Created().json(ChapterResponse::from(&chapter)))
}
