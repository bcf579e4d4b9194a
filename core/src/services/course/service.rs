//! Course catalogue management

use std::sync::Arc;

use chrono::Utc;
use lg_shared::{PaginatedResponse, Pagination};
use uuid::Uuid;

use crate::domain::entities::course::{Chapter, Course, CourseCategory};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::CourseRepository;

use super::types::{CourseUpdate, NewChapter, NewCourse};

fn required_text(field: &str, value: &str) -> DomainResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::required(field));
    }
    Ok(value.to_string())
}

fn optional_text(field: &str, value: Option<String>) -> DomainResult<Option<String>> {
    value.map(|v| required_text(field, &v)).transpose()
}

fn build_chapter(input: NewChapter) -> DomainResult<Chapter> {
    let title = required_text("title", &input.title)?;
    let video_url = required_text("videoUrl", &input.video_url)?;
    if input.duration_minutes == 0 {
        return Err(DomainError::validation("Chapter duration must be greater than 0"));
    }
    Ok(Chapter::new(title, video_url, input.duration_minutes, input.description.trim().to_string()))
}

pub struct CourseService<C: CourseRepository> {
    course_repository: Arc<C>,
}

impl<C: CourseRepository> CourseService<C> {
    pub fn new(course_repository: Arc<C>) -> Self {
        Self { course_repository }
    }

    pub async fn create_course(&self, input: NewCourse) -> DomainResult<Course> {
        let title = required_text("title", &input.title)?;
        let description = required_text("description", &input.description)?;
        let instructor = required_text("instructor", &input.instructor)?;
        let cover = input
            .cover_image_url
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| DomainError::required("coverImage"))?;

        if self.course_repository.find_by_title(&title).await?.is_some() {
            return Err(DomainError::duplicate("title"));
        }

        let mut course = Course::new(title, description, instructor, cover, input.category);
        for chapter in input.chapters {
            course.add_chapter(build_chapter(chapter)?);
        }

        let course = self.course_repository.create(course).await?;
        tracing::info!(course_id = %course.id, category = %course.category, "course created");
        Ok(course)
    }

    /// Apply a partial update.
    ///
    /// Returns the stored course and, when the cover was replaced, the path
    /// of the previous cover so the caller can remove the file.
    pub async fn update_course(
        &self,
        id: Uuid,
        update: CourseUpdate,
    ) -> DomainResult<(Course, Option<String>)> {
        let mut course = self.get_course(id).await?;

        if let Some(title) = optional_text("title", update.title)? {
            if title != course.title {
                if let Some(other) = self.course_repository.find_by_title(&title).await? {
                    if other.id != course.id {
                        return Err(DomainError::duplicate("title"));
                    }
                }
            }
            course.title = title;
        }
        if let Some(description) = optional_text("description", update.description)? {
            course.description = description;
        }
        if let Some(instructor) = optional_text("instructor", update.instructor)? {
            course.instructor = instructor;
        }
        if let Some(category) = update.category {
            course.category = category;
        }

        let mut replaced_cover = None;
        if let Some(cover) = update.cover_image_url.filter(|c| !c.trim().is_empty()) {
            if cover != course.cover_image_url {
                replaced_cover = Some(std::mem::replace(&mut course.cover_image_url, cover));
            }
        }

        if let Some(chapters) = update.chapters {
            course.chapters = chapters
                .into_iter()
                .map(build_chapter)
                .collect::<DomainResult<Vec<_>>>()?;
        }

        course.updated_at = Utc::now();
        let course = self.course_repository.update(course).await?;
        tracing::info!(course_id = %course.id, "course updated");
        Ok((course, replaced_cover))
    }

    /// Delete a course with its chapters and return what was removed
    pub async fn delete_course(&self, id: Uuid) -> DomainResult<Course> {
        let course = self.get_course(id).await?;
        if !self.course_repository.delete(id).await? {
            return Err(DomainError::not_found("Course"));
        }
        tracing::info!(course_id = %id, "course deleted");
        Ok(course)
    }

    pub async fn get_course(&self, id: Uuid) -> DomainResult<Course> {
        self.course_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Course"))
    }

    pub async fn list_courses(
        &self,
        category: Option<CourseCategory>,
        pagination: Pagination,
    ) -> DomainResult<PaginatedResponse<Course>> {
        let pagination = pagination.validate();
        let (courses, total) = self.course_repository.list(category, pagination).await?;
        Ok(PaginatedResponse::new(courses, pagination, total))
    }

    pub async fn add_chapter(&self, course_id: Uuid, input: NewChapter) -> DomainResult<Chapter> {
        let chapter = build_chapter(input)?;
        let chapter = self
            .course_repository
            .add_chapter(course_id, chapter)
            .await?
            .ok_or_else(|| DomainError::not_found("Course"))?;
        tracing::info!(%course_id, chapter_id = %chapter.id, "chapter added");
        Ok(chapter)
    }

    pub async fn count_by_category(&self, category: CourseCategory) -> DomainResult<u64> {
        self.course_repository.count_by_category(category).await
    }

    /// Look up one chapter; a missing course and a missing chapter are both
    /// not found
    pub async fn find_chapter(&self, course_id: Uuid, chapter_id: Uuid) -> DomainResult<Chapter> {
        let course = self.get_course(course_id).await?;
        course
            .chapter(chapter_id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("Chapter"))
    }
}
