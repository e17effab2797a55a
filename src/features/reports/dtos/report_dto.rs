use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::reports::models::{IssueType, Report, ReportSeverity, ReportStatus};

/// Query parameters for filtering the report list
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ReportFilterQuery {
    /// Case-insensitive substring match on the issue type label;
    /// "all" or absent matches everything
    #[serde(rename = "type")]
    pub issue_type: Option<String>,
    /// Exact severity match; "all" or absent matches everything
    pub severity: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReportDto {
    pub issue_type: IssueType,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub severity: Option<ReportSeverity>,
    pub material_estimate: Option<String>,
    pub estimated_cost: Option<String>,
    #[serde(default)]
    pub image_urls: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateReportDto {
    pub status: Option<ReportStatus>,
    pub severity: Option<ReportSeverity>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub material_estimate: Option<String>,
    pub estimated_cost: Option<String>,
}

impl UpdateReportDto {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.severity.is_none()
            && self.description.is_none()
            && self.location.is_none()
            && self.material_estimate.is_none()
            && self.estimated_cost.is_none()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReportResponseDto {
    pub id: i64,
    pub reference: String,
    pub issue_type: IssueType,
    pub issue_type_label: String,
    pub description: String,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: ReportStatus,
    pub status_label: String,
    pub severity: Option<ReportSeverity>,
    pub reported_by: String,
    pub reported_at: DateTime<Utc>,
    pub material_estimate: Option<String>,
    pub estimated_cost: Option<String>,
    pub image_urls: Vec<String>,
}

impl From<Report> for ReportResponseDto {
    fn from(report: Report) -> Self {
        Self {
            id: report.id,
            reference: report.reference.clone(),
            issue_type: report.issue_type,
            issue_type_label: report.issue_type.label().to_string(),
            description: report.description.clone(),
            location: report.location_text.clone(),
            latitude: report.latitude,
            longitude: report.longitude,
            status: report.status,
            status_label: report.status.label().to_string(),
            severity: report.severity,
            reported_by: report.reported_by.clone(),
            reported_at: report.reported_at,
            material_estimate: report.material_estimate.clone(),
            estimated_cost: report.estimated_cost,
            image_urls: report.image_urls,
        }
    }
}

/// Aggregate counts over the report collection
#[derive(Debug, Serialize, ToSchema)]
pub struct ReportStatsDto {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub resolved: usize,
    pub high_severity: usize,
    pub total_estimated_cost: f64,
}

/// A map pin for one report
#[derive(Debug, Serialize, ToSchema)]
pub struct MapMarkerDto {
    pub id: i64,
    pub reference: String,
    pub issue_type_label: String,
    pub latitude: f64,
    pub longitude: f64,
    pub severity: Option<ReportSeverity>,
    pub color: String,
    pub status: ReportStatus,
    pub description: String,
}
