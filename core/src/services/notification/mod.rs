//! Email notifications for OTP codes and subscription changes

mod service;
pub mod templates;
mod traits;

pub use service::NotificationService;
pub use traits::{EmailMessage, EmailServiceTrait};
