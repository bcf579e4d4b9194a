#[path = "trait.rs"]
mod trait_;
pub mod memory;

pub use memory::InMemoryCourseRepository;
pub use trait_::CourseRepository;

#[cfg(test)]
mod tests;
