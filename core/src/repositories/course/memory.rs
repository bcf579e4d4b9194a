//! In-memory implementation of CourseRepository

use async_trait::async_trait;
use chrono::Utc;
use lg_shared::Pagination;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::course::{Chapter, Course, CourseCategory};
use crate::errors::DomainError;

use super::trait_::CourseRepository;

#[derive(Clone, Default)]
pub struct InMemoryCourseRepository {
    courses: Arc<RwLock<HashMap<Uuid, Course>>>,
}

impl InMemoryCourseRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CourseRepository for InMemoryCourseRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Course>, DomainError> {
        Ok(self.courses.read().await.get(&id).cloned())
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Course>, DomainError> {
        let courses = self.courses.read().await;
        Ok(courses.values().find(|c| c.title == title).cloned())
    }

    async fn create(&self, course: Course) -> Result<Course, DomainError> {
        let mut courses = self.courses.write().await;
        if courses.values().any(|c| c.title == course.title) {
            return Err(DomainError::duplicate("title"));
        }
        courses.insert(course.id, course.clone());
        Ok(course)
    }

    async fn update(&self, course: Course) -> Result<Course, DomainError> {
        let mut courses = self.courses.write().await;
        if !courses.contains_key(&course.id) {
            return Err(DomainError::not_found("Course"));
        }
        if courses.values().any(|c| c.id != course.id && c.title == course.title) {
            return Err(DomainError::duplicate("title"));
        }
        courses.insert(course.id, course.clone());
        Ok(course)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.courses.write().await.remove(&id).is_some())
    }

    async fn list(
        &self,
        category: Option<CourseCategory>,
        pagination: Pagination,
    ) -> Result<(Vec<Course>, u64), DomainError> {
        let courses = self.courses.read().await;
        let mut matching: Vec<&Course> = courses
            .values()
            .filter(|c| category.map_or(true, |cat| c.category == cat))
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.title.cmp(&b.title)));

        let total = matching.len() as u64;
        let page = matching
            .into_iter()
            .skip(usize::try_from(pagination.offset()).unwrap_or(usize::MAX))
            .take(pagination.limit() as usize)
            .cloned()
            .collect();
        Ok((page, total))
    }

    async fn count_by_category(&self, category: CourseCategory) -> Result<u64, DomainError> {
        let courses = self.courses.read().await;
        Ok(courses.values().filter(|c| c.category == category).count() as u64)
    }

    async fn add_chapter(&self, course_id: Uuid, chapter: Chapter) -> Result<Option<Chapter>, DomainError> {
        let mut courses = self.courses.write().await;
        Ok(courses.get_mut(&course_id).map(|course| {
            course.chapters.push(chapter.clone());
            course.updated_at = Utc::now();
            chapter
        }))
    }
}
