//! Course service module

mod service;
mod types;

#[cfg(test)]
mod tests;

pub use service::CourseService;
pub use types::{CourseUpdate, NewChapter, NewCourse};
