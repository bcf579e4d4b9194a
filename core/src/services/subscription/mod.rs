//! Subscription service module
//!
//! Applies the free trial gate to chapter views and carries a payment from
//! receipt upload through admin approval.

mod service;
mod types;

#[cfg(test)]
mod tests;

pub use service::SubscriptionService;
pub use types::{PaymentMethod, PaymentSubmission};
