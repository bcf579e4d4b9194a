//! Uploaded image payloads and their stored location.

use crate::errors::ValidationError;

/// MIME types accepted for cover images and payment receipts
pub const ALLOWED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/jpg", "image/png", "image/webp"];

/// An image received in a multipart form, not yet written anywhere
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub field_name: String,
    pub original_name: Option<String>,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Check the MIME allow-list and the size limit
    pub fn validate(&self, max_bytes: usize) -> Result<(), ValidationError> {
        let content_type = self.content_type.to_lowercase();
        if !ALLOWED_IMAGE_TYPES.contains(&content_type.as_str()) {
            return Err(ValidationError::UnsupportedImageType {
                content_type: self.content_type.clone(),
            });
        }
        if self.bytes.len() > max_bytes {
            return Err(ValidationError::FileTooLarge { max_bytes });
        }
        Ok(())
    }

    /// File extension implied by the MIME type, with leading dot
    pub fn extension(&self) -> &'static str {
        match self.content_type.to_lowercase().as_str() {
            "image/png" => ".png",
            "image/webp" => ".webp",
            _ => ".jpg",
        }
    }
}

/// Where a stored file ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Public path or URL clients use to fetch the file
    pub public_path: String,
    pub size: usize,
}
