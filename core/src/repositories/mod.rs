//! Repository interfaces and in-memory implementations.

pub mod course;
pub mod user;

pub use course::{CourseRepository, InMemoryCourseRepository};
pub use user::{InMemoryUserRepository, UserRepository};
