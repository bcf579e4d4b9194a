//! User entity: identity, verification state and subscription state.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::verification_code::VerificationCode;
use crate::domain::value_objects::TrialViewOutcome;
use crate::errors::ValidationError;

/// Default number of free chapter views
pub const DEFAULT_MAX_TRIAL_VIDEOS: u32 = 3;

/// Payment/access tier of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    /// Registered but not yet verified
    #[default]
    None,
    /// Verified, limited to the free chapter allowance
    Trial,
    /// Payment receipt submitted, awaiting admin review
    Pending,
    /// Paid, unlimited access
    Active,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::None => "none",
            SubscriptionStatus::Trial => "trial",
            SubscriptionStatus::Pending => "pending",
            SubscriptionStatus::Active => "active",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, SubscriptionStatus::Active)
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SubscriptionStatus {
    type Err = ValidationError;

    /// Case-insensitive; older clients send `Trial`, `Pending`, `Active`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(SubscriptionStatus::None),
            "trial" => Ok(SubscriptionStatus::Trial),
            "pending" => Ok(SubscriptionStatus::Pending),
            "active" => Ok(SubscriptionStatus::Active),
            _ => Err(ValidationError::InvalidValue {
                field: "subscriptionStatus".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Fresh Man / Remedial track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Track {
    #[serde(rename = "Fresh Man")]
    FreshMan,
    #[serde(rename = "Remedial")]
    Remedial,
}

impl Track {
    pub fn as_str(&self) -> &'static str {
        match self {
            Track::FreshMan => "Fresh Man",
            Track::Remedial => "Remedial",
        }
    }
}

impl std::str::FromStr for Track {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(' ', "").as_str() {
            "freshman" => Ok(Track::FreshMan),
            "remedial" => Ok(Track::Remedial),
            _ => Err(ValidationError::InvalidValue {
                field: "freshOrRemedial".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Natural / Social science stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stream {
    Natural,
    Social,
}

impl Stream {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stream::Natural => "Natural",
            Stream::Social => "Social",
        }
    }
}

impl std::str::FromStr for Stream {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "natural" => Ok(Stream::Natural),
            "social" => Ok(Stream::Social),
            _ => Err(ValidationError::InvalidValue {
                field: "naturalOrSocial".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Receipt and metadata recorded when a user submits a payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentDetails {
    /// Public path of the uploaded receipt image
    pub receipt_path: String,
    pub method: String,
    pub amount: f64,
    pub payer_phone_number: String,
    pub paid_at: DateTime<Utc>,
}

/// User entity representing a registered learner or admin
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub name: String,

    /// Lowercase, unique
    pub email: String,

    /// bcrypt hash, never serialized to clients
    pub password_hash: String,

    pub is_admin: bool,
    pub is_verified: bool,

    /// Outstanding email verification code
    pub verification_code: Option<VerificationCode>,

    /// Outstanding password reset code
    pub reset_code: Option<VerificationCode>,

    /// Set once a reset code is verified; a new password is accepted until then
    pub reset_authorized_until: Option<DateTime<Utc>>,

    pub subscription_status: SubscriptionStatus,
    pub trial_videos_watched: u32,
    pub max_trial_videos: u32,
    pub payment: Option<PaymentDetails>,
    pub fresh_or_remedial: Option<Track>,
    pub natural_or_social: Option<Stream>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new unverified user
    pub fn new(name: String, email: String, password_hash: String, max_trial_videos: u32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            is_admin: false,
            is_verified: false,
            verification_code: None,
            reset_code: None,
            reset_authorized_until: None,
            subscription_status: SubscriptionStatus::None,
            trial_videos_watched: 0,
            max_trial_videos,
            payment: None,
            fresh_or_remedial: None,
            natural_or_social: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn set_verification_code(&mut self, code: VerificationCode) {
        self.verification_code = Some(code);
        self.touch();
    }

    /// Marks the email as verified and starts the free trial
    pub fn mark_verified(&mut self) {
        self.is_verified = true;
        self.verification_code = None;
        if self.subscription_status == SubscriptionStatus::None {
            self.subscription_status = SubscriptionStatus::Trial;
        }
        self.touch();
    }

    pub fn set_reset_code(&mut self, code: VerificationCode) {
        self.reset_code = Some(code);
        self.reset_authorized_until = None;
        self.touch();
    }

    /// Consume the reset code and open the password reset window
    pub fn authorize_password_reset(&mut self, now: DateTime<Utc>, window_minutes: i64) {
        self.reset_code = None;
        self.reset_authorized_until = Some(now + Duration::minutes(window_minutes));
        self.touch();
    }

    pub fn can_reset_password_at(&self, now: DateTime<Utc>) -> bool {
        self.reset_authorized_until
            .map(|until| now <= until)
            .unwrap_or(false)
    }

    /// Replace the password hash and close any reset window
    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.reset_code = None;
        self.reset_authorized_until = None;
        self.touch();
    }

    pub fn update_profile(
        &mut self,
        name: Option<String>,
        track: Option<Track>,
        stream: Option<Stream>,
    ) {
        if let Some(name) = name {
            self.name = name;
        }
        if track.is_some() {
            self.fresh_or_remedial = track;
        }
        if stream.is_some() {
            self.natural_or_social = stream;
        }
        self.touch();
    }

    /// Record a payment submission and move to pending review
    pub fn submit_payment(&mut self, payment: PaymentDetails) {
        self.payment = Some(payment);
        self.subscription_status = SubscriptionStatus::Pending;
        self.touch();
    }

    pub fn set_subscription_status(&mut self, status: SubscriptionStatus) {
        self.subscription_status = status;
        self.touch();
    }

    /// Apply the trial gate to one chapter view.
    ///
    /// Active subscribers are never counted. Everyone else is counted until
    /// `trial_videos_watched` reaches `max_trial_videos`, after which the
    /// counter stays put.
    pub fn consume_trial_view(&mut self) -> TrialViewOutcome {
        if self.subscription_status.is_active() {
            return TrialViewOutcome::Unlimited;
        }
        if self.trial_videos_watched >= self.max_trial_videos {
            return TrialViewOutcome::LimitReached {
                watched: self.trial_videos_watched,
                max: self.max_trial_videos,
            };
        }
        self.trial_videos_watched += 1;
        self.touch();
        TrialViewOutcome::Counted {
            watched: self.trial_videos_watched,
            remaining: self.max_trial_videos - self.trial_videos_watched,
        }
    }
}
