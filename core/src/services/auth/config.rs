//! Configuration for the authentication service

use lg_shared::config::{AuthConfig, TrialConfig};

use crate::domain::entities::user::DEFAULT_MAX_TRIAL_VIDEOS;
use crate::domain::entities::verification_code::DEFAULT_EXPIRATION_MINUTES;

#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Lifetime of verification and reset codes
    pub otp_expiry_minutes: i64,
    /// How long a verified reset code allows setting a new password
    pub reset_window_minutes: i64,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
    /// Free chapter views granted to new accounts
    pub max_trial_videos: u32,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            otp_expiry_minutes: DEFAULT_EXPIRATION_MINUTES,
            reset_window_minutes: 10,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            max_trial_videos: DEFAULT_MAX_TRIAL_VIDEOS,
        }
    }
}

impl AuthServiceConfig {
    pub fn from_config(auth: &AuthConfig, trial: &TrialConfig) -> Self {
        Self {
            otp_expiry_minutes: auth.otp_expiry_minutes,
            reset_window_minutes: auth.reset_window_minutes,
            bcrypt_cost: auth.bcrypt_cost,
            max_trial_videos: trial.max_trial_videos,
        }
    }
}
