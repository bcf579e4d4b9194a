//! Database module - MySQL implementations using SQLx
//!
//! - Connection pool management and embedded migrations
//! - `UserRepository` and `CourseRepository` implementations

pub mod connection;
pub mod mysql;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlCourseRepository, MySqlUserRepository};
