//! JSON HTTP email provider.
//!
//! Posts `{from, to, subject, html, text}` with a bearer key, which is the
//! shape Resend and several compatible relays accept.

use std::time::Duration;

use async_trait::async_trait;
use lg_core::services::notification::{EmailMessage, EmailServiceTrait};
use lg_shared::EmailConfig;
use serde::{Deserialize, Serialize};

use crate::InfrastructureError;

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    #[serde(default)]
    id: Option<String>,
}

pub struct HttpEmailService {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from_address: String,
}

impl HttpEmailService {
    /// # Errors
    /// * `InfrastructureError::Config` when no API key is configured
    pub fn new(config: &EmailConfig) -> Result<Self, InfrastructureError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| InfrastructureError::Config("EMAIL_API_KEY is required for the http email provider".into()))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key,
            from_address: config.from_address.clone(),
        })
    }
}

#[async_trait]
impl EmailServiceTrait for HttpEmailService {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, String> {
        let body = SendRequest {
            from: &self.from_address,
            to: [&message.to],
            subject: &message.subject,
            html: &message.html,
            text: &message.text,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| format!("email request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(format!("email provider returned {}: {}", status, detail));
        }

        let parsed: SendResponse = response.json().await.unwrap_or(SendResponse { id: None });
        Ok(parsed.id.unwrap_or_else(|| "accepted".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_api_key() {
        let config = EmailConfig::default();
        assert!(matches!(HttpEmailService::new(&config), Err(InfrastructureError::Config(_))));

        let config = EmailConfig {
            api_key: Some("re_test".into()),
            ..EmailConfig::default()
        };
        assert!(HttpEmailService::new(&config).is_ok());
    }

    #[test]
    fn test_request_body_shape() {
        let body = SendRequest {
            from: "LearnGate <no-reply@learngate.app>",
            to: ["a@example.com"],
            subject: "Hi",
            html: "<p>Hi</p>",
            text: "Hi",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["to"], serde_json::json!(["a@example.com"]));
        assert_eq!(json["subject"], "Hi");
    }
}
