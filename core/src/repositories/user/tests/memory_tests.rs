//! Unit tests for the in-memory user repository

use std::sync::Arc;

use chrono::{Duration, Utc};
use lg_shared::Pagination;
use uuid::Uuid;

use crate::domain::entities::user::{PaymentDetails, SubscriptionStatus, User};
use crate::domain::value_objects::TrialViewOutcome;
use crate::errors::{DomainError, ValidationError};
use crate::repositories::user::{InMemoryUserRepository, UserRepository};

fn user(name: &str, email: &str) -> User {
    User::new(name.to_string(), email.to_string(), "hash".to_string(), 3)
}

#[tokio::test]
async fn test_create_and_find() {
    let repo = InMemoryUserRepository::new();
    let created = repo.create(user("Abebe", "abebe@example.com")).await.unwrap();

    let by_id = repo.find_by_id(created.id).await.unwrap();
    assert_eq!(by_id.map(|u| u.email), Some("abebe@example.com".to_string()));

    let by_email = repo.find_by_email("abebe@example.com").await.unwrap();
    assert_eq!(by_email.map(|u| u.id), Some(created.id));

    assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let repo = InMemoryUserRepository::new();
    repo.create(user("Abebe", "abebe@example.com")).await.unwrap();

    let err = repo.create(user("Other", "abebe@example.com")).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::ValidationErr(ValidationError::DuplicateValue { ref field }) if field == "email"
    ));
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_update_missing_user() {
    let repo = InMemoryUserRepository::new();
    let err = repo.update(user("Ghost", "ghost@example.com")).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn test_update_keeps_stored_trial_counter() {
    let repo = InMemoryUserRepository::new();
    let mut learner = user("Stale", "stale@example.com");
    learner.mark_verified();
    let id = repo.create(learner).await.unwrap().id;

    let mut stale = repo.find_by_id(id).await.unwrap().unwrap();
    repo.consume_trial_view(id).await.unwrap();
    repo.consume_trial_view(id).await.unwrap();

    stale.name = "Renamed".to_string();
    let returned = repo.update(stale).await.unwrap();
    assert_eq!(returned.trial_videos_watched, 2);

    let stored = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.name, "Renamed");
    assert_eq!(stored.trial_videos_watched, 2);
}

#[tokio::test]
async fn test_list_search_and_pagination() {
    let repo = InMemoryUserRepository::new();
    let base = Utc::now();
    for (i, name) in ["Abebe", "Almaz", "Bekele", "Chaltu", "Dawit"].iter().enumerate() {
        let mut u = user(name, &format!("{}@example.com", name.to_lowercase()));
        u.created_at = base + Duration::seconds(i as i64);
        repo.create(u).await.unwrap();
    }

    let (page, total) = repo.list(None, Pagination::new(1, 2)).await.unwrap();
    assert_eq!(total, 5);
    assert_eq!(page.iter().map(|u| u.name.as_str()).collect::<Vec<_>>(), vec!["Dawit", "Chaltu"]);

    let (page, total) = repo.list(None, Pagination::new(3, 2)).await.unwrap();
    assert_eq!(total, 5);
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].name, "Abebe");

    // Case-insensitive substring: "Almaz" and "Chaltu"
    let (page, total) = repo.list(Some(" AL "), Pagination::default()).await.unwrap();
    assert_eq!(total, 2);
    assert_eq!(page.iter().map(|u| u.name.as_str()).collect::<Vec<_>>(), vec!["Chaltu", "Almaz"]);

    let (page, total) = repo.list(Some("bek"), Pagination::default()).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(page[0].name, "Bekele");

    let (_, total) = repo.list(Some("example.com"), Pagination::default()).await.unwrap();
    assert_eq!(total, 5);
}

#[tokio::test]
async fn test_counts_and_revenue() {
    let repo = InMemoryUserRepository::new();
    let mut active = user("Active", "active@example.com");
    active.submit_payment(PaymentDetails {
        receipt_path: "/uploads/r.png".into(),
        method: "cbe".into(),
        amount: 250.0,
        payer_phone_number: "0911000000".into(),
        paid_at: Utc::now(),
    });
    active.set_subscription_status(SubscriptionStatus::Active);

    let mut pending = user("Pending", "pending@example.com");
    pending.submit_payment(PaymentDetails {
        receipt_path: "/uploads/p.png".into(),
        method: "telebirr".into(),
        amount: 100.0,
        payer_phone_number: "0911000001".into(),
        paid_at: Utc::now(),
    });

    let mut trial = user("Trial", "trial@example.com");
    trial.mark_verified();

    for u in [active, pending, trial, user("New", "new@example.com")] {
        repo.create(u).await.unwrap();
    }

    let counts = repo.subscription_counts().await.unwrap();
    assert_eq!((counts.none, counts.trial, counts.pending, counts.active), (1, 1, 1, 1));
    // Pending payments are not revenue yet
    assert_eq!(repo.total_revenue().await.unwrap(), 250.0);

    let pending = repo.list_by_status(SubscriptionStatus::Pending).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].email, "pending@example.com");
}

#[tokio::test]
async fn test_consume_trial_view_unknown_user() {
    let repo = InMemoryUserRepository::new();
    assert_eq!(repo.consume_trial_view(Uuid::new_v4()).await.unwrap(), None);
}

#[tokio::test]
async fn test_concurrent_trial_views_never_exceed_limit() {
    let repo = Arc::new(InMemoryUserRepository::new());
    let mut learner = user("Racer", "racer@example.com");
    learner.mark_verified();
    let id = repo.create(learner).await.unwrap().id;

    let handles: Vec<_> = (0..20)
        .map(|_| {
            let repo = Arc::clone(&repo);
            tokio::spawn(async move { repo.consume_trial_view(id).await.unwrap() })
        })
        .collect();

    let mut counted = 0;
    for handle in handles {
        if let Some(TrialViewOutcome::Counted { .. }) = handle.await.unwrap() {
            counted += 1;
        }
    }

    assert_eq!(counted, 3);
    let stored = repo.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.trial_videos_watched, 3);
}
