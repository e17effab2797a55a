use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::features::uploads::dtos::{UploadImageDto, UploadedImageResponseDto};
use crate::features::uploads::models::ImageUpload;
use crate::features::uploads::services::UploadPipeline;
use crate::shared::types::ApiResponse;

/// Upload a damage photo
///
/// Accepts multipart/form-data with a single `file` field. The file is
/// validated before the simulated transfer starts.
#[utoipa::path(
    post,
    path = "/api/uploads",
    tag = "uploads",
    request_body(
        content = UploadImageDto,
        content_type = "multipart/form-data",
        description = "Photo upload form (jpeg, png or webp, max 10MB)",
    ),
    responses(
        (status = 201, description = "Photo uploaded", body = ApiResponse<UploadedImageResponseDto>),
        (status = 400, description = "Invalid or oversized file"),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn upload_image(
    State(pipeline): State<Arc<UploadPipeline>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<UploadedImageResponseDto>>)> {
    let upload = read_image_field(multipart).await?;
    let uploaded = pipeline.upload(upload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(UploadedImageResponseDto::from(uploaded)),
            Some("Photo uploaded successfully".to_string()),
            None,
        )),
    ))
}

/// Extracts the `file` field from a multipart request
pub async fn read_image_field(mut multipart: Multipart) -> Result<ImageUpload> {
    let mut upload: Option<ImageUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        if field_name == "file" {
            let content_type = field
                .content_type()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string());
            let filename = field
                .file_name()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "unnamed".to_string());
            let data = field.bytes().await.map_err(|e| {
                debug!("Failed to read file bytes: {}", e);
                AppError::BadRequest(format!("Failed to read file data: {}", e))
            })?;

            upload = Some(ImageUpload {
                data: data.to_vec(),
                filename,
                content_type,
            });
        } else {
            debug!("Ignoring unknown field: {}", field_name);
        }
    }

    upload.ok_or_else(|| AppError::BadRequest("File is required".to_string()))
}
