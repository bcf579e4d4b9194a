use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use lg_core::domain::entities::course::{Chapter, Course, CourseCategory};
use lg_core::domain::value_objects::TrialViewOutcome;
use lg_core::services::course::NewChapter;
use lg_shared::PaginatedResponse;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChapterResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub video_url: String,
    /// Minutes
    pub duration: u32,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Chapter> for ChapterResponse {
    fn from(chapter: &Chapter) -> Self {
        Self {
            id: chapter.id,
            title: chapter.title.clone(),
            video_url: chapter.video_url.clone(),
            duration: chapter.duration_minutes,
            description: chapter.description.clone(),
            created_at: chapter.created_at,
            updated_at: chapter.updated_at,
        }
    }
}

/// Catalogue view of a chapter. The video link is only handed out by the
/// gated watch route.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChapterSummary {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    /// Minutes
    pub duration: u32,
    pub description: String,
}

impl From<&Chapter> for ChapterSummary {
    fn from(chapter: &Chapter) -> Self {
        Self {
            id: chapter.id,
            title: chapter.title.clone(),
            duration: chapter.duration_minutes,
            description: chapter.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub instructor: String,
    pub cover_image: String,
    pub category: CourseCategory,
    pub chapters: Vec<ChapterSummary>,
    pub total_duration: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Course> for CourseResponse {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id,
            title: course.title.clone(),
            description: course.description.clone(),
            instructor: course.instructor.clone(),
            cover_image: course.cover_image_url.clone(),
            category: course.category,
            chapters: course.chapters.iter().map(ChapterSummary::from).collect(),
            total_duration: course.total_duration_minutes(),
            created_at: course.created_at,
            updated_at: course.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseListResponse {
    pub courses: Vec<CourseResponse>,
    pub total: u64,
    pub total_pages: u32,
    pub page: u32,
    pub limit: u32,
}

impl From<PaginatedResponse<Course>> for CourseListResponse {
    fn from(page: PaginatedResponse<Course>) -> Self {
        Self {
            courses: page.data.iter().map(CourseResponse::from).collect(),
            total: page.total,
            total_pages: page.total_pages,
            page: page.page,
            limit: page.limit,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListCoursesQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub category: Option<String>,
}

/// Chapter body, also used for the `chapters` JSON field of course forms
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddChapterRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 2048))]
    pub video_url: String,
    /// Minutes
    pub duration: u32,
    #[serde(default)]
    pub description: String,
}

impl From<AddChapterRequest> for NewChapter {
    fn from(request: AddChapterRequest) -> Self {
        NewChapter {
            title: request.title,
            video_url: request.video_url,
            duration_minutes: request.duration,
            description: request.description,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCountResponse {
    pub category: CourseCategory,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct WatchChapterResponse {
    pub chapter: ChapterResponse,
    pub access: TrialViewOutcome,
}
