//! Course and chapter inputs

use crate::domain::entities::course::CourseCategory;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChapter {
    pub title: String,
    pub video_url: String,
    pub duration_minutes: u32,
    pub description: String,
}

/// A course about to be created; the cover must already be stored
#[derive(Debug, Clone)]
pub struct NewCourse {
    pub title: String,
    pub description: String,
    pub instructor: String,
    pub category: CourseCategory,
    pub cover_image_url: Option<String>,
    pub chapters: Vec<NewChapter>,
}

/// Partial update. `None` keeps the stored value; `Some(chapters)` replaces
/// the whole chapter list.
#[derive(Debug, Clone, Default)]
pub struct CourseUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub instructor: Option<String>,
    pub category: Option<CourseCategory>,
    pub cover_image_url: Option<String>,
    pub chapters: Option<Vec<NewChapter>>,
}

impl CourseUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.instructor.is_none()
            && self.category.is_none()
            && self.cover_image_url.is_none()
            && self.chapters.is_none()
    }
}
