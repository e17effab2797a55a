use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::features::uploads::models::UploadedImage;

/// Multipart form schema for photo uploads
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadImageDto {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadedImageResponseDto {
    pub display_url: String,
    pub filename: String,
    pub content_type: String,
    pub size_bytes: usize,
    pub uploaded_at: DateTime<Utc>,
}

impl From<UploadedImage> for UploadedImageResponseDto {
    fn from(image: UploadedImage) -> Self {
        Self {
            display_url: image.display_url,
            filename: image.filename,
            content_type: image.content_type,
            size_bytes: image.size_bytes,
            uploaded_at: image.uploaded_at,
        }
    }
}
