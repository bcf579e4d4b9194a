//! Course repository trait. Chapters are persisted as part of their course.

use async_trait::async_trait;
use lg_shared::Pagination;
use uuid::Uuid;

use crate::domain::entities::course::{Chapter, Course, CourseCategory};
use crate::errors::DomainError;

#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Course>, DomainError>;

    /// Exact, case-sensitive title match
    async fn find_by_title(&self, title: &str) -> Result<Option<Course>, DomainError>;

    /// Insert a course with its chapters
    ///
    /// # Errors
    /// * `ValidationError::DuplicateValue { field: "title" }` when the title is taken
    async fn create(&self, course: Course) -> Result<Course, DomainError>;

    /// Replace the scalar fields and the full chapter list
    async fn update(&self, course: Course) -> Result<Course, DomainError>;

    /// Remove a course and its chapters; `false` when nothing was deleted
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Page through courses, newest first
    async fn list(
        &self,
        category: Option<CourseCategory>,
        pagination: Pagination,
    ) -> Result<(Vec<Course>, u64), DomainError>;

    async fn count_by_category(&self, category: CourseCategory) -> Result<u64, DomainError>;

    /// Append a chapter; `Ok(None)` when the course does not exist
    async fn add_chapter(&self, course_id: Uuid, chapter: Chapter) -> Result<Option<Chapter>, DomainError>;
}
