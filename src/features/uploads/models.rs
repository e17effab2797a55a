use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// MIME types accepted for damage photos
pub const ALLOWED_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

/// Maximum photo size in bytes (10MB)
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

pub fn is_mime_type_allowed(content_type: &str) -> bool {
    ALLOWED_MIME_TYPES.contains(&content_type)
}

pub fn extension_for_content_type(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

/// A photo received from a client, not yet stored
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub data: Vec<u8>,
    pub filename: String,
    pub content_type: String,
}

impl ImageUpload {
    /// Checks type and size limits. Runs before any storage work so a
    /// bad file never costs the simulated latency.
    pub fn validate(&self) -> crate::core::error::Result<()> {
        use crate::core::error::AppError;

        if !is_mime_type_allowed(&self.content_type) {
            return Err(AppError::Validation(format!(
                "File type '{}' is not allowed. Allowed types: {}",
                self.content_type,
                ALLOWED_MIME_TYPES.join(", ")
            )));
        }

        if self.data.len() > MAX_FILE_SIZE {
            return Err(AppError::Validation(format!(
                "File too large. Maximum size is {} MB",
                MAX_FILE_SIZE / 1024 / 1024
            )));
        }

        Ok(())
    }
}

/// A stored photo addressable by display URL
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadedImage {
    pub display_url: String,
    pub filename: String,
    pub content_type: String,
    pub size_bytes: usize,
    pub uploaded_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(content_type: &str, size: usize) -> ImageUpload {
        ImageUpload {
            data: vec![0u8; size],
            filename: "photo.jpg".to_string(),
            content_type: content_type.to_string(),
        }
    }

    #[test]
    fn accepts_the_three_image_types() {
        assert!(upload("image/jpeg", 100).validate().is_ok());
        assert!(upload("image/png", 100).validate().is_ok());
        assert!(upload("image/webp", 100).validate().is_ok());
    }

    #[test]
    fn rejects_disallowed_types() {
        assert!(upload("image/gif", 100).validate().is_err());
        assert!(upload("application/pdf", 100).validate().is_err());
        assert!(upload("text/plain", 100).validate().is_err());
    }

    #[test]
    fn rejects_files_over_the_size_ceiling() {
        assert!(upload("image/jpeg", MAX_FILE_SIZE).validate().is_ok());
        assert!(upload("image/jpeg", MAX_FILE_SIZE + 1).validate().is_err());
    }
}
