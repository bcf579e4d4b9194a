//! Upload, trial and keep-alive settings

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::env_or;

/// Local disk storage for uploaded images
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadConfig {
    /// Directory files are written to
    pub directory: PathBuf,

    /// URL prefix the directory is served under
    pub public_prefix: String,

    /// Largest accepted file in bytes
    pub max_file_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("uploads"),
            public_prefix: String::from("/uploads"),
            max_file_bytes: 5 * 1024 * 1024, // 5 MB
        }
    }
}

impl UploadConfig {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            ..Default::default()
        }
    }

    pub fn with_max_file_bytes(mut self, bytes: usize) -> Self {
        self.max_file_bytes = bytes;
        self
    }

    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            directory: std::env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.directory),
            public_prefix: defaults.public_prefix,
            max_file_bytes: env_or("MAX_UPLOAD_BYTES", defaults.max_file_bytes),
        }
    }
}

/// Free-tier access limits
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct TrialConfig {
    /// Chapter views granted before a subscription is required
    pub max_trial_videos: u32,
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self { max_trial_videos: 3 }
    }
}

impl TrialConfig {
    pub fn from_env() -> Self {
        Self {
            max_trial_videos: env_or("MAX_TRIAL_VIDEOS", Self::default().max_trial_videos),
        }
    }
}

/// Periodic self-ping that keeps free-tier hosts awake
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KeepAliveConfig {
    /// URL to GET; disabled when unset
    #[serde(default)]
    pub url: Option<String>,

    /// Seconds between pings
    pub interval_secs: u64,
}

impl Default for KeepAliveConfig {
    fn default() -> Self {
        Self {
            url: None,
            interval_secs: 840, // 14 minutes
        }
    }
}

impl KeepAliveConfig {
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("KEEP_ALIVE_URL").ok().filter(|u| !u.is_empty()),
            interval_secs: env_or("KEEP_ALIVE_INTERVAL_SECS", Self::default().interval_secs),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.url.is_some() && self.interval_secs > 0
    }
}
