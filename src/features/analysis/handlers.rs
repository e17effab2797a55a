use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::analysis::dtos::{
    AnalysisResponseDto, AnalyzeImageRequestDto, MaterialEstimateRequestDto,
    MaterialEstimateResponseDto,
};
use crate::features::analysis::models::material_guidance;
use crate::features::analysis::services::ImageAnalyzer;
use crate::shared::types::ApiResponse;

/// Analyze an uploaded damage photo
#[utoipa::path(
    post,
    path = "/api/ai/analyze",
    tag = "ai",
    request_body = AnalyzeImageRequestDto,
    responses(
        (status = 200, description = "Analysis complete", body = ApiResponse<AnalysisResponseDto>),
        (status = 400, description = "Invalid image URL"),
        (status = 502, description = "Analysis backend failed")
    ),
    security(("bearer_auth" = []))
)]
pub async fn analyze_image(
    State(analyzer): State<Arc<dyn ImageAnalyzer>>,
    AppJson(payload): AppJson<AnalyzeImageRequestDto>,
) -> Result<impl IntoResponse> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let result = analyzer.analyze(&payload.image_url).await?;

    Ok(Json(ApiResponse::success(
        Some(AnalysisResponseDto::from(result)),
        Some("Image analyzed successfully".to_string()),
        None,
    )))
}

/// Canned material guidance for an issue category
#[utoipa::path(
    post,
    path = "/api/ai/estimate-materials",
    tag = "ai",
    request_body = MaterialEstimateRequestDto,
    responses(
        (status = 200, description = "Material estimate", body = ApiResponse<MaterialEstimateResponseDto>)
    ),
    security(("bearer_auth" = []))
)]
pub async fn estimate_materials(
    AppJson(payload): AppJson<MaterialEstimateRequestDto>,
) -> Result<impl IntoResponse> {
    let estimate = material_guidance(payload.issue_type).to_string();

    Ok(Json(ApiResponse::success(
        Some(MaterialEstimateResponseDto {
            issue_type: payload.issue_type,
            estimate,
        }),
        Some("Material estimate generated".to_string()),
        None,
    )))
}
