//! Shared test doubles for services that send email

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::services::notification::{EmailMessage, EmailServiceTrait};

/// Records every message instead of sending it
#[derive(Clone, Default)]
pub struct RecordingEmailService {
    pub sent: Arc<Mutex<Vec<EmailMessage>>>,
}

impl RecordingEmailService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<EmailMessage> {
        self.sent.lock().unwrap().last().cloned()
    }

    /// First six-digit run in the most recent message body
    pub fn last_code(&self) -> Option<String> {
        let message = self.last()?;
        message
            .text
            .split(|c: char| !c.is_ascii_digit())
            .find(|chunk| chunk.len() == 6)
            .map(str::to_string)
    }
}

#[async_trait]
impl EmailServiceTrait for RecordingEmailService {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, String> {
        let mut sent = self.sent.lock().unwrap();
        sent.push(message.clone());
        Ok(format!("mock-{}", sent.len()))
    }
}

/// Always fails, to prove delivery errors never reach the caller
#[derive(Clone, Default)]
pub struct FailingEmailService {
    pub attempts: Arc<Mutex<u32>>,
}

#[async_trait]
impl EmailServiceTrait for FailingEmailService {
    async fn send_email(&self, _message: &EmailMessage) -> Result<String, String> {
        *self.attempts.lock().unwrap() += 1;
        Err("provider unavailable".to_string())
    }
}
