use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use lg_core::domain::entities::user::{Stream, SubscriptionStatus, Track, User};
use lg_shared::PaginatedResponse;

/// Public view of an account. Never carries the password hash or codes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
    pub is_verified: bool,
    pub subscription_status: SubscriptionStatus,
    pub trial_videos_watched: u32,
    pub max_trial_videos: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_receipt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payer_phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<DateTime<Utc>>,
    pub fresh_or_remedial: Option<Track>,
    pub natural_or_social: Option<Stream>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        let payment = user.payment.as_ref();
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            is_admin: user.is_admin,
            is_verified: user.is_verified,
            subscription_status: user.subscription_status,
            trial_videos_watched: user.trial_videos_watched,
            max_trial_videos: user.max_trial_videos,
            payment_receipt: payment.map(|p| p.receipt_path.clone()),
            payment_method: payment.map(|p| p.method.clone()),
            payment_amount: payment.map(|p| p.amount),
            payer_phone_number: payment.map(|p| p.payer_phone_number.clone()),
            payment_date: payment.map(|p| p.paid_at),
            fresh_or_remedial: user.fresh_or_remedial,
            natural_or_social: user.natural_or_social,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 254))]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
    #[serde(default)]
    pub fresh_or_remedial: Option<String>,
    #[serde(default)]
    pub natural_or_social: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct OtpRequest {
    #[validate(length(min = 1, max = 254))]
    pub email: String,
    #[validate(length(min = 1, max = 16))]
    pub otp: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct EmailRequest {
    #[validate(length(min = 1, max = 254))]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 254))]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, max = 254))]
    pub email: String,
    #[serde(alias = "password")]
    #[validate(length(min = 1, max = 128))]
    pub new_password: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, max = 128))]
    pub current_password: String,
    #[validate(length(min = 1, max = 128))]
    pub new_password: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(max = 100))]
    pub name: Option<String>,
    pub fresh_or_remedial: Option<String>,
    pub natural_or_social: Option<String>,
}

/// `{message, user}` returned by login and email verification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthMessageResponse {
    pub message: String,
    pub user: UserResponse,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersQuery {
    pub search_query: Option<String>,
    /// Older clients page with `userPage`
    pub user_page: Option<u32>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
    pub total: u64,
    pub total_pages: u32,
    pub page: u32,
    pub limit: u32,
}

impl From<PaginatedResponse<User>> for UserListResponse {
    fn from(page: PaginatedResponse<User>) -> Self {
        Self {
            users: page.data.iter().map(UserResponse::from).collect(),
            total: page.total,
            total_pages: page.total_pages,
            page: page.page,
            limit: page.limit,
        }
    }
}
