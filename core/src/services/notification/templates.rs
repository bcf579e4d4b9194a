//! Email bodies for codes and subscription updates

use crate::domain::entities::user::SubscriptionStatus;

use super::traits::EmailMessage;

pub fn verification_code(app_name: &str, to: &str, name: &str, code: &str, minutes: i64) -> EmailMessage {
    EmailMessage {
        to: to.to_string(),
        subject: format!("{} email verification code", app_name),
        html: format!(
            "<p>Hello {name},</p><p>Your verification code is <strong>{code}</strong>.</p>\
             <p>It expires in {minutes} minutes.</p>"
        ),
        text: format!(
            "Hello {name},\n\nYour verification code is {code}.\nIt expires in {minutes} minutes.\n"
        ),
    }
}

pub fn password_reset_code(app_name: &str, to: &str, name: &str, code: &str, minutes: i64) -> EmailMessage {
    EmailMessage {
        to: to.to_string(),
        subject: format!("{} password reset code", app_name),
        html: format!(
            "<p>Hello {name},</p><p>Use <strong>{code}</strong> to reset your password.</p>\
             <p>The code expires in {minutes} minutes. Ignore this email if you did not ask for it.</p>"
        ),
        text: format!(
            "Hello {name},\n\nUse {code} to reset your password.\n\
             The code expires in {minutes} minutes. Ignore this email if you did not ask for it.\n"
        ),
    }
}

pub fn subscription_update(app_name: &str, to: &str, name: &str, status: SubscriptionStatus) -> EmailMessage {
    let (subject, body) = match status {
        SubscriptionStatus::Active => (
            format!("Your {} subscription is active", app_name),
            "Your payment was approved. All courses and chapters are now unlocked.".to_string(),
        ),
        SubscriptionStatus::Trial => (
            format!("Your {} payment needs attention", app_name),
            "We could not approve your payment. Your account is back on the free trial; \
             please submit a new receipt."
                .to_string(),
        ),
        other => (
            format!("Your {} subscription status changed", app_name),
            format!("Your subscription status is now {}.", other),
        ),
    };

    EmailMessage {
        to: to.to_string(),
        subject,
        html: format!("<p>Hello {name},</p><p>{body}</p>"),
        text: format!("Hello {name},\n\n{body}\n"),
    }
}
