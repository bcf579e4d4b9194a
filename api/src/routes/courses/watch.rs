//! Chapter viewing behind the trial gate

use actix_web::{web, HttpResponse};

use lg_core::repositories::{CourseRepository, UserRepository};
use lg_core::services::notification::EmailServiceTrait;
use lg_core::services::storage::FileStorageTrait;

use crate::dto::{ChapterResponse, WatchChapterResponse};
use crate::handlers::{parse_id, ApiResult};
use crate::middleware::AuthContext;
use crate::state::AppState;

/// Handler for GET /api/courses/{id}/chapters/{chapterId}/watch
///
/// The chapter is looked up first so an unknown chapter never costs a trial
/// view. Then the gate runs: active subscribers pass, everyone else spends
/// one free view or gets 403 once the allowance is used up.
pub async fn watch_chapter<U, C, E, F>(
    state: web::Data<AppState<U, C, E, F>>,
    auth: AuthContext,
    path: web::Path<(String, String)>,
) -> ApiResult
where
    U: UserRepository + 'static,
    C: CourseRepository + 'static,
    E: EmailServiceTrait + 'static,
    F: FileStorageTrait + 'static,
{
    let (course_id, chapter_id) = path.into_inner();
    let course_id = parse_id(&course_id)?;
    let chapter_id = parse_id(&chapter_id)?;

    let chapter = state.course_service.find_chapter(course_id, chapter_id).await?;
    let access = state.subscription_service.record_video_view(auth.user_id).await?;
    log::debug!("User {} watching chapter {} ({:?})", auth.user_id, chapter_id, access);

    Ok(HttpResponse::Ok().json(WatchChapterResponse {
        chapter: ChapterResponse::from(&chapter),
        access,
    }))
}
