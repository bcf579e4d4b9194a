//! Recording email provider for tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use lg_core::services::notification::{EmailMessage, EmailServiceTrait};

/// Keeps every message in memory so tests can read the codes back
#[derive(Clone, Default)]
pub struct MockEmailService {
    sent: Arc<Mutex<Vec<EmailMessage>>>,
}

impl MockEmailService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn count(&self) -> usize {
        self.sent.lock().map(|s| s.len()).unwrap_or(0)
    }

    /// Latest six-digit code sent to `to`
    pub fn last_code_for(&self, to: &str) -> Option<String> {
        let sent = self.sent.lock().ok()?;
        sent.iter().rev().filter(|m| m.to == to).find_map(|m| {
            m.text
                .split(|c: char| !c.is_ascii_digit())
                .find(|chunk| chunk.len() == 6)
                .map(str::to_string)
        })
    }
}

#[async_trait]
impl EmailServiceTrait for MockEmailService {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, String> {
        tracing::debug!(to = %message.to, subject = %message.subject, "[mock email]");

        let mut sent = self
            .sent
            .lock()
            .map_err(|_| "mock email store poisoned".to_string())?;
        sent.push(message.clone());
        Ok(format!("mock-{}", sent.len()))
    }
}
