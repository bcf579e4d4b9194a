#[path = "trait.rs"]
mod trait_;
pub mod memory;

pub use memory::InMemoryUserRepository;
pub use trait_::UserRepository;

#[cfg(test)]
mod tests;
