//! Multipart form parsing for course covers and payment receipts

use std::collections::HashMap;

use actix_multipart::Multipart;
use futures_util::StreamExt;

use lg_core::domain::value_objects::ImageUpload;
use lg_core::errors::{DomainError, ValidationError};

/// Upper bound for a single text field
const MAX_TEXT_FIELD_BYTES: usize = 64 * 1024;

/// Text fields and image parts of one multipart request
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, ImageUpload>,
}

impl MultipartForm {
    /// Trimmed text value; blank values count as absent
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn take_file(&mut self, name: &str) -> Option<ImageUpload> {
        self.files.remove(name)
    }

    pub fn has_file(&self, name: &str) -> bool {
        self.files.contains_key(name)
    }
}

/// Drain the multipart stream.
///
/// Parts with a filename are kept as files, everything else as text. A file
/// larger than `max_file_bytes` aborts the read.
pub async fn read_multipart(
    mut payload: Multipart,
    max_file_bytes: usize,
) -> Result<MultipartForm, DomainError> {
    let mut form = MultipartForm::default();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| DomainError::validation(format!("Malformed multipart body: {}", e)))?;

        let disposition = field.content_disposition();
        let name = disposition.get_name().unwrap_or_default().to_string();
        let file_name = disposition.get_filename().map(str::to_string);
        let content_type = field
            .content_type()
            .map(|m| m.essence_str().to_string())
            .unwrap_or_default();

        let limit = if file_name.is_some() { max_file_bytes } else { MAX_TEXT_FIELD_BYTES };
        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| DomainError::validation(format!("Malformed multipart body: {}", e)))?;
            if bytes.len() + chunk.len() > limit {
                return Err(match file_name {
                    Some(_) => ValidationError::FileTooLarge { max_bytes: max_file_bytes }.into(),
                    None => DomainError::validation(format!("Field {} is too long", name)),
                });
            }
            bytes.extend_from_slice(&chunk);
        }

        if name.is_empty() {
            continue;
        }

        match file_name {
            Some(original_name) => {
                // An empty file input still sends a part
                if bytes.is_empty() {
                    continue;
                }
                form.files.insert(
                    name.clone(),
                    ImageUpload {
                        field_name: name,
                        original_name: Some(original_name),
                        content_type,
                        bytes,
                    },
                );
            }
            None => {
                let value = String::from_utf8(bytes)
                    .map_err(|_| DomainError::validation(format!("Field {} is not valid UTF-8", name)))?;
                form.fields.insert(name, value);
            }
        }
    }

    Ok(form)
}
