//! Course entity with its embedded, ordered chapters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ValidationError;

/// Closed set of catalogue categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CourseCategory {
    #[serde(rename = "Natural-FreshMan")]
    NaturalFreshMan,
    #[serde(rename = "Natural-Remedial")]
    NaturalRemedial,
    #[serde(rename = "Social-FreshMan")]
    SocialFreshMan,
    #[serde(rename = "Social-Remedial")]
    SocialRemedial,
    #[serde(rename = "Common")]
    Common,
}

impl CourseCategory {
    pub const ALL: [CourseCategory; 5] = [
        CourseCategory::NaturalFreshMan,
        CourseCategory::NaturalRemedial,
        CourseCategory::SocialFreshMan,
        CourseCategory::SocialRemedial,
        CourseCategory::Common,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CourseCategory::NaturalFreshMan => "Natural-FreshMan",
            CourseCategory::NaturalRemedial => "Natural-Remedial",
            CourseCategory::SocialFreshMan => "Social-FreshMan",
            CourseCategory::SocialRemedial => "Social-Remedial",
            CourseCategory::Common => "Common",
        }
    }
}

impl std::fmt::Display for CourseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CourseCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        CourseCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "category".to_string(),
                value: s.to_string(),
            })
    }
}

/// A video lesson owned by exactly one course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: Uuid,
    pub title: String,
    pub video_url: String,
    /// Length in minutes
    pub duration_minutes: u32,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Chapter {
    pub fn new(title: String, video_url: String, duration_minutes: u32, description: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            video_url,
            duration_minutes,
            description,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: Uuid,
    /// Unique across the catalogue
    pub title: String,
    pub description: String,
    pub instructor: String,
    pub cover_image_url: String,
    pub category: CourseCategory,
    /// Insertion order is display order
    pub chapters: Vec<Chapter>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    pub fn new(
        title: String,
        description: String,
        instructor: String,
        cover_image_url: String,
        category: CourseCategory,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            instructor,
            cover_image_url,
            category,
            chapters: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn add_chapter(&mut self, chapter: Chapter) {
        self.chapters.push(chapter);
        self.updated_at = Utc::now();
    }

    pub fn chapter(&self, chapter_id: Uuid) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.id == chapter_id)
    }

    /// Total running time in minutes
    pub fn total_duration_minutes(&self) -> u32 {
        self.chapters.iter().map(|c| c.duration_minutes).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trips_through_wire_form() {
        for category in CourseCategory::ALL {
            assert_eq!(category.as_str().parse::<CourseCategory>(), Ok(category));
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
        assert_eq!("natural-freshman".parse::<CourseCategory>(), Ok(CourseCategory::NaturalFreshMan));
        assert!("Engineering".parse::<CourseCategory>().is_err());
    }

    #[test]
    fn test_chapters_keep_insertion_order() {
        let mut course = Course::new(
            "Physics".into(),
            "Grade 12 physics".into(),
            "Dr. Alemu".into(),
            "/uploads/cover.png".into(),
            CourseCategory::NaturalFreshMan,
        );
        let first = Chapter::new("Vectors".into(), "https://youtu.be/a".into(), 12, String::new());
        let second = Chapter::new("Motion".into(), "https://youtu.be/b".into(), 20, String::new());
        let second_id = second.id;
        course.add_chapter(first);
        course.add_chapter(second);

        assert_eq!(course.chapters[0].title, "Vectors");
        assert_eq!(course.chapters[1].title, "Motion");
        assert_eq!(course.chapter(second_id).map(|c| c.duration_minutes), Some(20));
        assert_eq!(course.total_duration_minutes(), 32);
    }
}
