//! File storage abstraction for uploaded images

use async_trait::async_trait;

use crate::domain::value_objects::{ImageUpload, StoredFile};

/// Persists uploaded images and serves them back by public path
#[async_trait]
pub trait FileStorageTrait: Send + Sync {
    /// Store `upload` under a fresh name starting with `prefix`
    async fn store(&self, prefix: &str, upload: &ImageUpload) -> Result<StoredFile, String>;

    /// Remove a file previously returned by [`FileStorageTrait::store`].
    /// Unknown paths are not an error.
    async fn remove(&self, public_path: &str) -> Result<(), String>;
}
