//! Outbound email abstraction

use async_trait::async_trait;

/// A rendered email ready to hand to a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Email delivery provider
#[async_trait]
pub trait EmailServiceTrait: Send + Sync {
    /// Send one email
    ///
    /// # Returns
    /// * `Ok(String)` - Provider message id
    /// * `Err(String)` - Delivery failure description
    async fn send_email(&self, message: &EmailMessage) -> Result<String, String>;
}
