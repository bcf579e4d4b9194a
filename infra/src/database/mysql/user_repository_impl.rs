//! MySQL implementation of the UserRepository trait.
//!
//! Codes, payment details and profile choices are flattened into nullable
//! columns of the `users` table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{mysql::MySqlRow, MySqlPool, Row};
use uuid::Uuid;

use lg_core::domain::entities::user::{PaymentDetails, SubscriptionStatus, User};
use lg_core::domain::entities::verification_code::VerificationCode;
use lg_core::domain::value_objects::{SubscriptionCounts, TrialViewOutcome};
use lg_core::errors::DomainError;
use lg_core::repositories::UserRepository;
use lg_shared::Pagination;

use super::{column_error, like_pattern, map_write_error, query_error};

const USER_COLUMNS: &str = r#"
    id, name, email, password_hash, is_admin, is_verified,
    verification_code, verification_code_expires_at, verification_code_attempts,
    reset_code, reset_code_expires_at, reset_code_attempts, reset_authorized_until,
    subscription_status, trial_videos_watched, max_trial_videos,
    payment_receipt, payment_method, payment_amount, payer_phone_number, paid_at,
    fresh_or_remedial, natural_or_social, created_at, updated_at
"#;

pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn get<'r, T>(row: &'r MySqlRow, column: &str) -> Result<T, DomainError>
    where
        T: sqlx::Decode<'r, sqlx::MySql> + sqlx::Type<sqlx::MySql>,
    {
        row.try_get(column).map_err(|e| column_error(column, e))
    }

    fn code(
        code: Option<String>,
        expires_at: Option<DateTime<Utc>>,
        failed_attempts: u32,
    ) -> Option<VerificationCode> {
        match (code, expires_at) {
            (Some(code), Some(expires_at)) => {
                Some(VerificationCode::from_parts(code, expires_at, failed_attempts))
            }
            _ => None,
        }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &MySqlRow) -> Result<User, DomainError> {
        let id: String = Self::get(row, "id")?;
        let status: String = Self::get(row, "subscription_status")?;
        let track: Option<String> = Self::get(row, "fresh_or_remedial")?;
        let stream: Option<String> = Self::get(row, "natural_or_social")?;

        let payment = match (
            Self::get::<Option<String>>(row, "payment_receipt")?,
            Self::get::<Option<DateTime<Utc>>>(row, "paid_at")?,
        ) {
            (Some(receipt_path), Some(paid_at)) => Some(PaymentDetails {
                receipt_path,
                method: Self::get::<Option<String>>(row, "payment_method")?.unwrap_or_default(),
                amount: Self::get::<Option<f64>>(row, "payment_amount")?.unwrap_or_default(),
                payer_phone_number: Self::get::<Option<String>>(row, "payer_phone_number")?
                    .unwrap_or_default(),
                paid_at,
            }),
            _ => None,
        };

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| column_error("id", e))?,
            name: Self::get(row, "name")?,
            email: Self::get(row, "email")?,
            password_hash: Self::get(row, "password_hash")?,
            is_admin: Self::get(row, "is_admin")?,
            is_verified: Self::get(row, "is_verified")?,
            verification_code: Self::code(
                Self::get(row, "verification_code")?,
                Self::get(row, "verification_code_expires_at")?,
                Self::get(row, "verification_code_attempts")?,
            ),
            reset_code: Self::code(
                Self::get(row, "reset_code")?,
                Self::get(row, "reset_code_expires_at")?,
                Self::get(row, "reset_code_attempts")?,
            ),
            reset_authorized_until: Self::get(row, "reset_authorized_until")?,
            subscription_status: status
                .parse()
                .map_err(|e| column_error("subscription_status", e))?,
            trial_videos_watched: Self::get(row, "trial_videos_watched")?,
            max_trial_videos: Self::get(row, "max_trial_videos")?,
            payment,
            fresh_or_remedial: track
                .map(|t| t.parse())
                .transpose()
                .map_err(|e| column_error("fresh_or_remedial", e))?,
            natural_or_social: stream
                .map(|s| s.parse())
                .transpose()
                .map_err(|e| column_error("natural_or_social", e))?,
            created_at: Self::get(row, "created_at")?,
            updated_at: Self::get(row, "updated_at")?,
        })
    }

    async fn fetch_one_where(&self, clause: &str, value: String) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE {} = ? LIMIT 1", USER_COLUMNS, clause);
        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error(e, "Failed to find user"))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.fetch_one_where("id", id.to_string()).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.fetch_one_where("email", email.to_lowercase()).await
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = format!(
            "INSERT INTO users ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            USER_COLUMNS
        );

        let payment = user.payment.as_ref();
        sqlx::query(&query)
            .bind(user.id.to_string())
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.is_admin)
            .bind(user.is_verified)
            .bind(user.verification_code.as_ref().map(|c| c.code.clone()))
            .bind(user.verification_code.as_ref().map(|c| c.expires_at))
            .bind(user.verification_code.as_ref().map_or(0, |c| c.failed_attempts))
            .bind(user.reset_code.as_ref().map(|c| c.code.clone()))
            .bind(user.reset_code.as_ref().map(|c| c.expires_at))
            .bind(user.reset_code.as_ref().map_or(0, |c| c.failed_attempts))
            .bind(user.reset_authorized_until)
            .bind(user.subscription_status.as_str())
            .bind(user.trial_videos_watched)
            .bind(user.max_trial_videos)
            .bind(payment.map(|p| p.receipt_path.clone()))
            .bind(payment.map(|p| p.method.clone()))
            .bind(payment.map(|p| p.amount))
            .bind(payment.map(|p| p.payer_phone_number.clone()))
            .bind(payment.map(|p| p.paid_at))
            .bind(user.fresh_or_remedial.map(|t| t.as_str()))
            .bind(user.natural_or_social.map(|s| s.as_str()))
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "email", "Failed to create user"))?;

        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users SET
                name = ?, email = ?, password_hash = ?, is_admin = ?, is_verified = ?,
                verification_code = ?, verification_code_expires_at = ?, verification_code_attempts = ?,
                reset_code = ?, reset_code_expires_at = ?, reset_code_attempts = ?,
                reset_authorized_until = ?,
                subscription_status = ?, max_trial_videos = ?,
                payment_receipt = ?, payment_method = ?, payment_amount = ?,
                payer_phone_number = ?, paid_at = ?,
                fresh_or_remedial = ?, natural_or_social = ?, updated_at = ?
            WHERE id = ?
        "#;

        // trial_videos_watched is only written by consume_trial_view
        let payment = user.payment.as_ref();
        let result = sqlx::query(query)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.is_admin)
            .bind(user.is_verified)
            .bind(user.verification_code.as_ref().map(|c| c.code.clone()))
            .bind(user.verification_code.as_ref().map(|c| c.expires_at))
            .bind(user.verification_code.as_ref().map_or(0, |c| c.failed_attempts))
            .bind(user.reset_code.as_ref().map(|c| c.code.clone()))
            .bind(user.reset_code.as_ref().map(|c| c.expires_at))
            .bind(user.reset_code.as_ref().map_or(0, |c| c.failed_attempts))
            .bind(user.reset_authorized_until)
            .bind(user.subscription_status.as_str())
            .bind(user.max_trial_videos)
            .bind(payment.map(|p| p.receipt_path.clone()))
            .bind(payment.map(|p| p.method.clone()))
            .bind(payment.map(|p| p.amount))
            .bind(payment.map(|p| p.payer_phone_number.clone()))
            .bind(payment.map(|p| p.paid_at))
            .bind(user.fresh_or_remedial.map(|t| t.as_str()))
            .bind(user.natural_or_social.map(|s| s.as_str()))
            .bind(user.updated_at)
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "email", "Failed to update user"))?;

        // MySQL reports zero affected rows when nothing changed, so confirm
        // the row exists before calling it missing
        if result.rows_affected() == 0 && self.find_by_id(user.id).await?.is_none() {
            return Err(DomainError::not_found("User"));
        }

        self.find_by_id(user.id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))
    }

    async fn list(
        &self,
        search: Option<&str>,
        pagination: Pagination,
    ) -> Result<(Vec<User>, u64), DomainError> {
        let pattern = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(like_pattern);
        let filter = if pattern.is_some() {
            "WHERE name LIKE ? OR email LIKE ?"
        } else {
            ""
        };

        let count_query = format!("SELECT COUNT(*) AS total FROM users {}", filter);
        let mut count = sqlx::query(&count_query);
        if let Some(p) = &pattern {
            count = count.bind(p.clone()).bind(p.clone());
        }
        let total: i64 = count
            .fetch_one(&self.pool)
            .await
            .map_err(|e| query_error(e, "Failed to count users"))?
            .try_get("total")
            .map_err(|e| column_error("total", e))?;

        let list_query = format!(
            "SELECT {} FROM users {} ORDER BY created_at DESC LIMIT ? OFFSET ?",
            USER_COLUMNS, filter
        );
        let mut list = sqlx::query(&list_query);
        if let Some(p) = &pattern {
            list = list.bind(p.clone()).bind(p.clone());
        }
        let rows = list
            .bind(pagination.limit() as u64)
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_error(e, "Failed to list users"))?;

        let users = rows.iter().map(Self::row_to_user).collect::<Result<Vec<_>, _>>()?;
        Ok((users, total.max(0) as u64))
    }

    async fn list_by_status(&self, status: SubscriptionStatus) -> Result<Vec<User>, DomainError> {
        let query = format!(
            "SELECT {} FROM users WHERE subscription_status = ? ORDER BY paid_at ASC, created_at ASC",
            USER_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(status.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_error(e, "Failed to list users by status"))?;

        rows.iter().map(Self::row_to_user).collect()
    }

    async fn subscription_counts(&self) -> Result<SubscriptionCounts, DomainError> {
        let rows = sqlx::query(
            "SELECT subscription_status, COUNT(*) AS total FROM users GROUP BY subscription_status",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| query_error(e, "Failed to count subscriptions"))?;

        let mut counts = SubscriptionCounts::default();
        for row in rows {
            let status: String = Self::get(&row, "subscription_status")?;
            let total: i64 = Self::get(&row, "total")?;
            let total = total.max(0) as u64;
            match status.parse::<SubscriptionStatus>() {
                Ok(SubscriptionStatus::None) => counts.none += total,
                Ok(SubscriptionStatus::Trial) => counts.trial += total,
                Ok(SubscriptionStatus::Pending) => counts.pending += total,
                Ok(SubscriptionStatus::Active) => counts.active += total,
                Err(_) => tracing::warn!(%status, "unknown subscription status in users table"),
            }
        }
        Ok(counts)
    }

    async fn total_revenue(&self) -> Result<f64, DomainError> {
        let row = sqlx::query(
            "SELECT SUM(payment_amount) AS revenue FROM users WHERE subscription_status = 'active'",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| query_error(e, "Failed to sum revenue"))?;

        let revenue: Option<f64> = Self::get(&row, "revenue")?;
        Ok(revenue.unwrap_or(0.0))
    }

    async fn consume_trial_view(&self, id: Uuid) -> Result<Option<TrialViewOutcome>, DomainError> {
        // Conditional increment: the WHERE clause is the gate
        let result = sqlx::query(
            r#"
            UPDATE users
            SET trial_videos_watched = trial_videos_watched + 1, updated_at = ?
            WHERE id = ?
              AND subscription_status <> 'active'
              AND trial_videos_watched < max_trial_videos
            "#,
        )
        .bind(Utc::now())
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| query_error(e, "Failed to record trial view"))?;

        let Some(user) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let outcome = if result.rows_affected() == 1 {
            TrialViewOutcome::Counted {
                watched: user.trial_videos_watched,
                remaining: user.max_trial_videos.saturating_sub(user.trial_videos_watched),
            }
        } else if user.subscription_status.is_active() {
            TrialViewOutcome::Unlimited
        } else {
            TrialViewOutcome::LimitReached {
                watched: user.trial_videos_watched,
                max: user.max_trial_videos,
            }
        };
        Ok(Some(outcome))
    }
}
