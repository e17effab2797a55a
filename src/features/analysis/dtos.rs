use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::analysis::models::AnalysisResult;
use crate::features::reports::models::{IssueType, ReportSeverity};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AnalyzeImageRequestDto {
    #[validate(url(message = "image_url must be a valid URL"))]
    pub image_url: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AnalysisResponseDto {
    pub area_m2: f64,
    pub depth_m: f64,
    pub asphalt_estimate: String,
    pub cement_estimate: String,
    pub severity: ReportSeverity,
    pub material_estimate: String,
}

impl From<AnalysisResult> for AnalysisResponseDto {
    fn from(result: AnalysisResult) -> Self {
        let material_estimate = result.material_estimate();
        Self {
            area_m2: result.area_m2,
            depth_m: result.depth_m,
            asphalt_estimate: result.asphalt_estimate,
            cement_estimate: result.cement_estimate,
            severity: result.severity,
            material_estimate,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct MaterialEstimateRequestDto {
    pub issue_type: IssueType,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MaterialEstimateResponseDto {
    pub issue_type: IssueType,
    pub estimate: String,
}
