//! MySQL repository implementations

mod course_repository_impl;
mod user_repository_impl;

pub use course_repository_impl::MySqlCourseRepository;
pub use user_repository_impl::MySqlUserRepository;

use lg_core::errors::DomainError;

/// Map a driver error, turning unique key violations into a duplicate
/// field error for `field`
pub(crate) fn map_write_error(err: sqlx::Error, field: &str, context: &str) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return DomainError::duplicate(field);
        }
    }
    query_error(err, context)
}

pub(crate) fn query_error(err: sqlx::Error, context: &str) -> DomainError {
    tracing::error!(error = %err, context, "database query failed");
    DomainError::Internal {
        message: format!("{}: {}", context, err),
    }
}

pub(crate) fn column_error(column: &str, err: impl std::fmt::Display) -> DomainError {
    DomainError::Internal {
        message: format!("Failed to get {}: {}", column, err),
    }
}

/// `%term%` with LIKE wildcards escaped
pub(crate) fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("abebe"), "%abebe%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }
}
