//! Pagination related types for list endpoints

use serde::{Deserialize, Serialize};

/// Offset pagination parameters for list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: u32,

    /// Number of items per page
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl Pagination {
    /// Create a new pagination, clamping out-of-range values
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(MIN_LIMIT, MAX_LIMIT),
        }
    }

    /// Build from optional query values
    pub fn from_query(page: Option<u32>, limit: Option<u32>) -> Self {
        Self::new(page.unwrap_or(DEFAULT_PAGE), limit.unwrap_or(DEFAULT_LIMIT))
    }

    /// Calculate the offset for database queries
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }

    /// Get the limit for database queries
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Validate and sanitize pagination parameters
    pub fn validate(self) -> Self {
        Self::new(self.page, self.limit)
    }
}

/// Paginated response wrapper with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    /// The actual data items
    pub data: Vec<T>,

    /// Current page number
    pub page: u32,

    /// Items per page
    pub limit: u32,

    /// Total number of items
    pub total: u64,

    /// Total number of pages
    pub total_pages: u32,

    pub has_next: bool,

    pub has_prev: bool,
}

impl<T> PaginatedResponse<T> {
    /// Create a new paginated response
    pub fn new(data: Vec<T>, pagination: Pagination, total: u64) -> Self {
        let total_pages = calculate_total_pages(total, pagination.limit);

        Self {
            data,
            page: pagination.page,
            limit: pagination.limit,
            total,
            total_pages,
            has_next: pagination.page < total_pages,
            has_prev: pagination.page > 1,
        }
    }

    /// Transform the data items using a function
    pub fn map<U, F>(self, f: F) -> PaginatedResponse<U>
    where
        F: FnMut(T) -> U,
    {
        PaginatedResponse {
            data: self.data.into_iter().map(f).collect(),
            page: self.page,
            limit: self.limit,
            total: self.total,
            total_pages: self.total_pages,
            has_next: self.has_next,
            has_prev: self.has_prev,
        }
    }

    /// Get the number of items in this page
    pub fn count(&self) -> usize {
        self.data.len()
    }
}

/// Calculate total pages from total items and items per page
pub fn calculate_total_pages(total: u64, limit: u32) -> u32 {
    if total == 0 || limit == 0 {
        return 0;
    }
    let limit = u64::from(limit);
    u32::try_from(total.div_ceil(limit)).unwrap_or(u32::MAX)
}

// Constants
pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
pub const MIN_LIMIT: u32 = 1;
pub const MAX_LIMIT: u32 = 100;

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_math() {
        assert_eq!(Pagination::new(1, 10).offset(), 0);
        assert_eq!(Pagination::new(3, 10).offset(), 20);
        assert_eq!(Pagination::new(0, 10).offset(), 0);
    }

    #[test]
    fn test_limit_is_clamped() {
        assert_eq!(Pagination::new(1, 0).limit(), MIN_LIMIT);
        assert_eq!(Pagination::new(1, 10_000).limit(), MAX_LIMIT);
        assert_eq!(Pagination::from_query(None, None), Pagination::new(1, 10));
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(calculate_total_pages(0, 10), 0);
        assert_eq!(calculate_total_pages(1, 10), 1);
        assert_eq!(calculate_total_pages(10, 10), 1);
        assert_eq!(calculate_total_pages(11, 10), 2);
    }

    #[test]
    fn test_paginated_response_flags() {
        let response = PaginatedResponse::new(vec![1, 2], Pagination::new(2, 2), 5);
        assert_eq!(response.total_pages, 3);
        assert!(response.has_next);
        assert!(response.has_prev);

        let last = PaginatedResponse::new(vec![5], Pagination::new(3, 2), 5);
        assert!(!last.has_next);

        let empty: PaginatedResponse<u8> = PaginatedResponse::new(Vec::new(), Pagination::default(), 0);
        assert_eq!(empty.total_pages, 0);
        assert!(!empty.has_next);
        assert!(!empty.has_prev);
    }

    #[test]
    fn test_map_keeps_metadata() {
        let response = PaginatedResponse::new(vec![1, 2], Pagination::new(1, 2), 4).map(|n| n * 10);
        assert_eq!(response.data, vec![10, 20]);
        assert_eq!(response.total, 4);
        assert_eq!(response.total_pages, 2);
    }
}
