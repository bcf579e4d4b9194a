//! Business services containing domain logic and use cases.

pub mod auth;
pub mod course;
pub mod notification;
pub mod storage;
pub mod subscription;
pub mod token;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig, RegisterUser};
pub use course::{CourseService, CourseUpdate, NewChapter, NewCourse};
pub use notification::{EmailMessage, EmailServiceTrait, NotificationService};
pub use storage::FileStorageTrait;
pub use subscription::{PaymentMethod, PaymentSubmission, SubscriptionService};
pub use token::{TokenService, TokenServiceConfig};
pub use user::{ProfileUpdate, UserService};
