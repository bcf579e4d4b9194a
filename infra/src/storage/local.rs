//! Images written to a local directory and served under a public prefix.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use lg_core::domain::value_objects::{ImageUpload, StoredFile};
use lg_core::services::storage::FileStorageTrait;
use lg_shared::UploadConfig;
use uuid::Uuid;

use crate::InfrastructureError;

#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    directory: PathBuf,
    public_prefix: String,
}

impl LocalFileStorage {
    /// Create the storage, making the directory if needed
    pub async fn new(config: &UploadConfig) -> Result<Self, InfrastructureError> {
        tokio::fs::create_dir_all(&config.directory).await?;
        tracing::info!(directory = %config.directory.display(), "local file storage ready");
        Ok(Self {
            directory: config.directory.clone(),
            public_prefix: config.public_prefix.trim_end_matches('/').to_string(),
        })
    }

    /// `<prefix>-<millis>-<short uuid><ext>`
    fn file_name(prefix: &str, extension: &str) -> String {
        let short_id = Uuid::new_v4().simple().to_string();
        format!(
            "{}-{}-{}{}",
            sanitize(prefix),
            Utc::now().timestamp_millis(),
            &short_id[..8],
            extension
        )
    }

    /// Map a public path back to a file inside the directory. Anything that
    /// is not a plain file name under the prefix is rejected.
    fn resolve(&self, public_path: &str) -> Option<PathBuf> {
        let name = public_path
            .strip_prefix(&self.public_prefix)?
            .strip_prefix('/')?;
        let valid = !name.is_empty()
            && !name.contains('/')
            && !name.contains('\\')
            && name != "."
            && name != "..";
        valid.then(|| self.directory.join(name))
    }
}

fn sanitize(prefix: &str) -> String {
    let cleaned: String = prefix
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}

#[async_trait]
impl FileStorageTrait for LocalFileStorage {
    async fn store(&self, prefix: &str, upload: &ImageUpload) -> Result<StoredFile, String> {
        let name = Self::file_name(prefix, upload.extension());
        let path = self.directory.join(&name);

        tokio::fs::write(&path, &upload.bytes)
            .await
            .map_err(|e| format!("failed to write {}: {}", path.display(), e))?;

        tracing::debug!(file = %name, size = upload.bytes.len(), "stored upload");
        Ok(StoredFile {
            public_path: format!("{}/{}", self.public_prefix, name),
            size: upload.bytes.len(),
        })
    }

    async fn remove(&self, public_path: &str) -> Result<(), String> {
        let Some(path) = self.resolve(public_path) else {
            tracing::debug!(%public_path, "not a local upload, nothing to remove");
            return Ok(());
        };

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(format!("failed to remove {}: {}", path.display(), e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(bytes: &[u8]) -> ImageUpload {
        ImageUpload {
            field_name: "coverImage".to_string(),
            original_name: Some("cover.png".to_string()),
            content_type: "image/png".to_string(),
            bytes: bytes.to_vec(),
        }
    }

    async fn storage(dir: &tempfile::TempDir) -> LocalFileStorage {
        LocalFileStorage::new(&UploadConfig::new(dir.path())).await.unwrap()
    }

    #[tokio::test]
    async fn test_store_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(&dir).await;

        let stored = storage.store("coverImage", &png(b"\x89PNG data")).await.unwrap();
        assert!(stored.public_path.starts_with("/uploads/coverImage-"));
        assert!(stored.public_path.ends_with(".png"));
        assert_eq!(stored.size, 9);

        let name = stored.public_path.trim_start_matches("/uploads/");
        let on_disk = dir.path().join(name);
        assert_eq!(tokio::fs::read(&on_disk).await.unwrap(), b"\x89PNG data");

        storage.remove(&stored.public_path).await.unwrap();
        assert!(!on_disk.exists());

        // Removing twice is fine
        storage.remove(&stored.public_path).await.unwrap();
    }

    #[tokio::test]
    async fn test_remove_ignores_foreign_and_traversal_paths() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(&dir).await;

        assert!(storage.resolve("/uploads/../secret").is_none());
        assert!(storage.resolve("https://cdn.example.com/a.png").is_none());
        assert!(storage.remove("/uploads/../secret").await.is_ok());
        assert!(storage.resolve("/uploads/a.png").is_some());
    }

    #[test]
    fn test_file_names_are_unique_and_clean() {
        let a = LocalFileStorage::file_name("payment receipt", ".jpg");
        let b = LocalFileStorage::file_name("payment receipt", ".jpg");
        assert_ne!(a, b);
        assert!(a.starts_with("paymentreceipt-"));
        assert!(a.ends_with(".jpg"));
    }
}
