//! Email delivery providers
//!
//! - **Http**: JSON API with bearer key
//! - **Log**: logs recipient and subject when no API is configured
//! - **Mock**: keeps messages in memory for tests

mod http_email;
mod log_email;
mod mock_email;

#[cfg(test)]
mod tests;

use async_trait::async_trait;
use lg_core::services::notification::{EmailMessage, EmailServiceTrait};
use lg_shared::config::{EmailConfig, EmailProviderKind};

pub use http_email::HttpEmailService;
pub use log_email::{redact_codes, LogEmailService};
pub use mock_email::MockEmailService;

/// The configured provider, picked once at start-up
pub enum EmailProvider {
    Http(HttpEmailService),
    Log(LogEmailService),
}

impl EmailProvider {
    pub fn name(&self) -> &'static str {
        match self {
            EmailProvider::Http(_) => "http",
            EmailProvider::Log(_) => "log",
        }
    }
}

#[async_trait]
impl EmailServiceTrait for EmailProvider {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, String> {
        match self {
            EmailProvider::Http(service) => service.send_email(message).await,
            EmailProvider::Log(service) => service.send_email(message).await,
        }
    }
}

/// Create an email service based on configuration.
///
/// A misconfigured HTTP provider falls back to logging so the server still
/// starts; the failure is logged.
pub fn create_email_service(config: &EmailConfig) -> EmailProvider {
    match config.provider {
        EmailProviderKind::Log => EmailProvider::Log(LogEmailService::new()),
        EmailProviderKind::Http => match HttpEmailService::new(config) {
            Ok(service) => EmailProvider::Http(service),
            Err(e) => {
                tracing::error!(error = %e, "falling back to logging email provider");
                EmailProvider::Log(LogEmailService::new())
            }
        },
    }
}
