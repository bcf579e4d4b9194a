//! MySQL implementation of the CourseRepository trait.
//!
//! Chapters live in their own table, ordered by `position`, and are always
//! loaded together with their course.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{mysql::MySqlRow, MySql, MySqlPool, Row, Transaction};
use uuid::Uuid;

use lg_core::domain::entities::course::{Chapter, Course, CourseCategory};
use lg_core::errors::DomainError;
use lg_core::repositories::CourseRepository;
use lg_shared::Pagination;

use super::{column_error, map_write_error, query_error};

const COURSE_COLUMNS: &str =
    "id, title, description, instructor, cover_image_url, category, created_at, updated_at";

const CHAPTER_COLUMNS: &str =
    "id, course_id, position, title, video_url, duration_minutes, description, created_at, updated_at";

pub struct MySqlCourseRepository {
    pool: MySqlPool,
}

impl MySqlCourseRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn parse_id(row: &MySqlRow, column: &str) -> Result<Uuid, DomainError> {
        let raw: String = row.try_get(column).map_err(|e| column_error(column, e))?;
        Uuid::parse_str(&raw).map_err(|e| column_error(column, e))
    }

    fn row_to_course(row: &MySqlRow) -> Result<Course, DomainError> {
        let category: String = row
            .try_get("category")
            .map_err(|e| column_error("category", e))?;

        Ok(Course {
            id: Self::parse_id(row, "id")?,
            title: row.try_get("title").map_err(|e| column_error("title", e))?,
            description: row
                .try_get("description")
                .map_err(|e| column_error("description", e))?,
            instructor: row
                .try_get("instructor")
                .map_err(|e| column_error("instructor", e))?,
            cover_image_url: row
                .try_get("cover_image_url")
                .map_err(|e| column_error("cover_image_url", e))?,
            category: category.parse().map_err(|e| column_error("category", e))?,
            chapters: Vec::new(),
            created_at: row
                .try_get("created_at")
                .map_err(|e| column_error("created_at", e))?,
            updated_at: row
                .try_get("updated_at")
                .map_err(|e| column_error("updated_at", e))?,
        })
    }

    fn row_to_chapter(row: &MySqlRow) -> Result<(Uuid, Chapter), DomainError> {
        let course_id = Self::parse_id(row, "course_id")?;
        let chapter = Chapter {
            id: Self::parse_id(row, "id")?,
            title: row.try_get("title").map_err(|e| column_error("title", e))?,
            video_url: row
                .try_get("video_url")
                .map_err(|e| column_error("video_url", e))?,
            duration_minutes: row
                .try_get("duration_minutes")
                .map_err(|e| column_error("duration_minutes", e))?,
            description: row
                .try_get("description")
                .map_err(|e| column_error("description", e))?,
            created_at: row
                .try_get("created_at")
                .map_err(|e| column_error("created_at", e))?,
            updated_at: row
                .try_get("updated_at")
                .map_err(|e| column_error("updated_at", e))?,
        };
        Ok((course_id, chapter))
    }

    /// Fill in the chapters of each course with one query
    async fn attach_chapters(&self, mut courses: Vec<Course>) -> Result<Vec<Course>, DomainError> {
        if courses.is_empty() {
            return Ok(courses);
        }

        let placeholders = vec!["?"; courses.len()].join(", ");
        let query = format!(
            "SELECT {} FROM chapters WHERE course_id IN ({}) ORDER BY course_id, position",
            CHAPTER_COLUMNS, placeholders
        );
        let mut q = sqlx::query(&query);
        for course in &courses {
            q = q.bind(course.id.to_string());
        }
        let rows = q
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_error(e, "Failed to load chapters"))?;

        let mut by_course: HashMap<Uuid, Vec<Chapter>> = HashMap::new();
        for row in &rows {
            let (course_id, chapter) = Self::row_to_chapter(row)?;
            by_course.entry(course_id).or_default().push(chapter);
        }
        for course in &mut courses {
            course.chapters = by_course.remove(&course.id).unwrap_or_default();
        }
        Ok(courses)
    }

    async fn insert_chapters(
        tx: &mut Transaction<'_, MySql>,
        course_id: Uuid,
        chapters: &[Chapter],
    ) -> Result<(), DomainError> {
        let query = format!(
            "INSERT INTO chapters ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            CHAPTER_COLUMNS
        );
        for (position, chapter) in chapters.iter().enumerate() {
            sqlx::query(&query)
                .bind(chapter.id.to_string())
                .bind(course_id.to_string())
                .bind(position as u32)
                .bind(&chapter.title)
                .bind(&chapter.video_url)
                .bind(chapter.duration_minutes)
                .bind(&chapter.description)
                .bind(chapter.created_at)
                .bind(chapter.updated_at)
                .execute(&mut **tx)
                .await
                .map_err(|e| query_error(e, "Failed to insert chapter"))?;
        }
        Ok(())
    }

    async fn find_one_where(&self, column: &str, value: String) -> Result<Option<Course>, DomainError> {
        let query = format!("SELECT {} FROM courses WHERE {} = ? LIMIT 1", COURSE_COLUMNS, column);
        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error(e, "Failed to find course"))?;

        match row {
            Some(row) => {
                let course = Self::row_to_course(&row)?;
                Ok(self.attach_chapters(vec![course]).await?.pop())
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl CourseRepository for MySqlCourseRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Course>, DomainError> {
        self.find_one_where("id", id.to_string()).await
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<Course>, DomainError> {
        // BINARY keeps the match case-sensitive under the default collation
        self.find_one_where("BINARY title", title.to_string()).await
    }

    async fn create(&self, course: Course) -> Result<Course, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| query_error(e, "Failed to begin transaction"))?;

        let query = format!(
            "INSERT INTO courses ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            COURSE_COLUMNS
        );
        sqlx::query(&query)
            .bind(course.id.to_string())
            .bind(&course.title)
            .bind(&course.description)
            .bind(&course.instructor)
            .bind(&course.cover_image_url)
            .bind(course.category.as_str())
            .bind(course.created_at)
            .bind(course.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_write_error(e, "title", "Failed to create course"))?;

        Self::insert_chapters(&mut tx, course.id, &course.chapters).await?;

        tx.commit()
            .await
            .map_err(|e| query_error(e, "Failed to commit course"))?;
        Ok(course)
    }

    async fn update(&self, course: Course) -> Result<Course, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| query_error(e, "Failed to begin transaction"))?;

        let exists = sqlx::query("SELECT id FROM courses WHERE id = ? FOR UPDATE")
            .bind(course.id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| query_error(e, "Failed to lock course"))?;
        if exists.is_none() {
            return Err(DomainError::not_found("Course"));
        }

        sqlx::query(
            r#"
            UPDATE courses
            SET title = ?, description = ?, instructor = ?, cover_image_url = ?,
                category = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&course.title)
        .bind(&course.description)
        .bind(&course.instructor)
        .bind(&course.cover_image_url)
        .bind(course.category.as_str())
        .bind(course.updated_at)
        .bind(course.id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, "title", "Failed to update course"))?;

        sqlx::query("DELETE FROM chapters WHERE course_id = ?")
            .bind(course.id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| query_error(e, "Failed to replace chapters"))?;
        Self::insert_chapters(&mut tx, course.id, &course.chapters).await?;

        tx.commit()
            .await
            .map_err(|e| query_error(e, "Failed to commit course"))?;
        Ok(course)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        // Chapters go with the course through ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM courses WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| query_error(e, "Failed to delete course"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(
        &self,
        category: Option<CourseCategory>,
        pagination: Pagination,
    ) -> Result<(Vec<Course>, u64), DomainError> {
        let filter = if category.is_some() { "WHERE category = ?" } else { "" };

        let count_query = format!("SELECT COUNT(*) AS total FROM courses {}", filter);
        let mut count = sqlx::query(&count_query);
        if let Some(c) = category {
            count = count.bind(c.as_str());
        }
        let total: i64 = count
            .fetch_one(&self.pool)
            .await
            .map_err(|e| query_error(e, "Failed to count courses"))?
            .try_get("total")
            .map_err(|e| column_error("total", e))?;

        let list_query = format!(
            "SELECT {} FROM courses {} ORDER BY created_at DESC LIMIT ? OFFSET ?",
            COURSE_COLUMNS, filter
        );
        let mut list = sqlx::query(&list_query);
        if let Some(c) = category {
            list = list.bind(c.as_str());
        }
        let rows = list
            .bind(pagination.limit() as u64)
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_error(e, "Failed to list courses"))?;

        let courses = rows
            .iter()
            .map(Self::row_to_course)
            .collect::<Result<Vec<_>, _>>()?;
        let courses = self.attach_chapters(courses).await?;
        Ok((courses, total.max(0) as u64))
    }

    async fn count_by_category(&self, category: CourseCategory) -> Result<u64, DomainError> {
        let total: i64 = sqlx::query("SELECT COUNT(*) AS total FROM courses WHERE category = ?")
            .bind(category.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| query_error(e, "Failed to count courses"))?
            .try_get("total")
            .map_err(|e| column_error("total", e))?;
        Ok(total.max(0) as u64)
    }

    async fn add_chapter(&self, course_id: Uuid, chapter: Chapter) -> Result<Option<Chapter>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| query_error(e, "Failed to begin transaction"))?;

        let exists = sqlx::query("SELECT id FROM courses WHERE id = ? FOR UPDATE")
            .bind(course_id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| query_error(e, "Failed to lock course"))?;
        if exists.is_none() {
            return Ok(None);
        }

        let next: i64 = sqlx::query(
            "SELECT CAST(COALESCE(MAX(position) + 1, 0) AS SIGNED) AS next FROM chapters WHERE course_id = ?",
        )
        .bind(course_id.to_string())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| query_error(e, "Failed to read chapter position"))?
        .try_get("next")
        .map_err(|e| column_error("next", e))?;

        let query = format!(
            "INSERT INTO chapters ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            CHAPTER_COLUMNS
        );
        sqlx::query(&query)
            .bind(chapter.id.to_string())
            .bind(course_id.to_string())
            .bind(next.max(0) as u32)
            .bind(&chapter.title)
            .bind(&chapter.video_url)
            .bind(chapter.duration_minutes)
            .bind(&chapter.description)
            .bind(chapter.created_at)
            .bind(chapter.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| query_error(e, "Failed to insert chapter"))?;

        sqlx::query("UPDATE courses SET updated_at = ? WHERE id = ?")
            .bind(Utc::now())
            .bind(course_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| query_error(e, "Failed to touch course"))?;

        tx.commit()
            .await
            .map_err(|e| query_error(e, "Failed to commit chapter"))?;
        Ok(Some(chapter))
    }
}
