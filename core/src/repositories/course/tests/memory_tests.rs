use chrono::{Duration, Utc};
use lg_shared::Pagination;
use uuid::Uuid;

use crate::domain::entities::course::{Chapter, Course, CourseCategory};
use crate::errors::{DomainError, ValidationError};
use crate::repositories::course::{CourseRepository, InMemoryCourseRepository};

fn course(title: &str, category: CourseCategory) -> Course {
    Course::new(
        title.to_string(),
        format!("{} description", title),
        "Instructor".to_string(),
        "/uploads/cover.png".to_string(),
        category,
    )
}

#[tokio::test]
async fn test_title_is_unique() {
    let repo = InMemoryCourseRepository::new();
    repo.create(course("Biology", CourseCategory::Common)).await.unwrap();

    let err = repo.create(course("Biology", CourseCategory::Common)).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::ValidationErr(ValidationError::DuplicateValue { ref field }) if field == "title"
    ));
}

#[tokio::test]
async fn test_update_rejects_title_of_other_course() {
    let repo = InMemoryCourseRepository::new();
    repo.create(course("Biology", CourseCategory::Common)).await.unwrap();
    let mut chemistry = repo.create(course("Chemistry", CourseCategory::Common)).await.unwrap();

    chemistry.title = "Biology".to_string();
    assert!(repo.update(chemistry.clone()).await.is_err());

    // Keeping its own title is fine
    chemistry.title = "Chemistry".to_string();
    chemistry.instructor = "New Instructor".to_string();
    let updated = repo.update(chemistry).await.unwrap();
    assert_eq!(updated.instructor, "New Instructor");
}

#[tokio::test]
async fn test_list_filters_by_category_and_pages() {
    let repo = InMemoryCourseRepository::new();
    let base = Utc::now();
    for i in 0..5 {
        let category = if i % 2 == 0 {
            CourseCategory::NaturalFreshMan
        } else {
            CourseCategory::SocialRemedial
        };
        let mut c = course(&format!("Course {}", i), category);
        c.created_at = base + Duration::seconds(i);
        repo.create(c).await.unwrap();
    }

    let (all, total) = repo.list(None, Pagination::new(1, 10)).await.unwrap();
    assert_eq!(total, 5);
    assert_eq!(all[0].title, "Course 4");

    let (natural, total) = repo
        .list(Some(CourseCategory::NaturalFreshMan), Pagination::new(2, 2))
        .await
        .unwrap();
    assert_eq!(total, 3);
    assert_eq!(natural.len(), 1);
    assert_eq!(natural[0].title, "Course 0");

    assert_eq!(repo.count_by_category(CourseCategory::SocialRemedial).await.unwrap(), 2);
    assert_eq!(repo.count_by_category(CourseCategory::Common).await.unwrap(), 0);
}

#[tokio::test]
async fn test_add_chapter_and_delete() {
    let repo = InMemoryCourseRepository::new();
    let created = repo.create(course("Physics", CourseCategory::Common)).await.unwrap();

    let chapter = Chapter::new("Intro".into(), "https://youtu.be/x".into(), 10, String::new());
    let added = repo.add_chapter(created.id, chapter.clone()).await.unwrap();
    assert_eq!(added, Some(chapter));

    let missing = Chapter::new("Lost".into(), "https://youtu.be/y".into(), 5, String::new());
    assert_eq!(repo.add_chapter(Uuid::new_v4(), missing).await.unwrap(), None);

    let stored = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(stored.chapters.len(), 1);

    assert!(repo.delete(created.id).await.unwrap());
    assert!(!repo.delete(created.id).await.unwrap());
    assert!(repo.find_by_id(created.id).await.unwrap().is_none());
}
