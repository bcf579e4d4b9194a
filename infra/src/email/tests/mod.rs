use lg_core::services::notification::{EmailMessage, EmailServiceTrait};
use lg_shared::config::{EmailConfig, EmailProviderKind};

use super::{create_email_service, redact_codes, EmailProvider, LogEmailService, MockEmailService};

fn message(to: &str, text: &str) -> EmailMessage {
    EmailMessage {
        to: to.to_string(),
        subject: "LearnGate email verification code".to_string(),
        html: String::new(),
        text: text.to_string(),
    }
}

#[tokio::test]
async fn test_mock_records_messages() {
    let mock = MockEmailService::new();
    let id = mock.send_email(&message("a@example.com", "code 123456")).await.unwrap();
    mock.send_email(&message("b@example.com", "code 654321")).await.unwrap();
    mock.send_email(&message("a@example.com", "code 111222, valid 10 minutes")).await.unwrap();

    assert_eq!(id, "mock-1");
    assert_eq!(mock.count(), 3);
    assert_eq!(mock.last_code_for("a@example.com").as_deref(), Some("111222"));
    assert_eq!(mock.last_code_for("b@example.com").as_deref(), Some("654321"));
    assert_eq!(mock.last_code_for("c@example.com"), None);
}

#[test]
fn test_factory_selects_provider() {
    let fallback = create_email_service(&EmailConfig::default());
    assert_eq!(fallback.name(), "log");

    let http = create_email_service(&EmailConfig {
        provider: EmailProviderKind::Http,
        api_key: Some("re_test".into()),
        ..EmailConfig::default()
    });
    assert!(matches!(http, EmailProvider::Http(_)));

    let missing_key = create_email_service(&EmailConfig {
        provider: EmailProviderKind::Http,
        api_key: None,
        ..EmailConfig::default()
    });
    assert_eq!(missing_key.name(), "log");
}

#[tokio::test]
async fn test_log_provider_counts_without_keeping_messages() {
    let service = LogEmailService::new();
    for i in 1..=3 {
        let id = service.send_email(&message("a@example.com", "code 123456")).await.unwrap();
        assert_eq!(id, format!("log-{}", i));
    }
    assert_eq!(service.message_count(), 3);
}

#[test]
fn test_redact_codes_masks_six_digit_runs() {
    assert_eq!(
        redact_codes("Your code is 042917. It expires in 10 minutes."),
        "Your code is ******. It expires in 10 minutes."
    );
    assert_eq!(redact_codes("123456"), "******");
    assert_eq!(redact_codes("order 1234567 on 2024"), "order 1234567 on 2024");
    assert_eq!(redact_codes("a 111111 b 222222"), "a ****** b ******");
}
