//! Logging email provider used when no delivery API is configured

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use lg_core::domain::entities::CODE_LENGTH;
use lg_core::services::notification::{EmailMessage, EmailServiceTrait};

/// Writes each message to the log and keeps nothing.
///
/// One-time codes are masked in the logged body.
#[derive(Clone, Default)]
pub struct LogEmailService {
    message_count: Arc<AtomicU64>,
}

impl LogEmailService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of messages logged so far
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmailServiceTrait for LogEmailService {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, String> {
        let n = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!(to = %message.to, subject = %message.subject, "email not delivered: no provider configured");
        tracing::debug!(body = %redact_codes(&message.text), "undelivered email body");
        Ok(format!("log-{}", n))
    }
}

/// Mask every standalone run of `CODE_LENGTH` digits
pub fn redact_codes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut digits = String::new();
    let flush = |digits: &mut String, out: &mut String| {
        if digits.len() == CODE_LENGTH {
            out.extend(std::iter::repeat('*').take(CODE_LENGTH));
        } else {
            out.push_str(digits);
        }
        digits.clear();
    };

    for c in text.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else {
            flush(&mut digits, &mut out);
            out.push(c);
        }
    }
    flush(&mut digits, &mut out);
    out
}
