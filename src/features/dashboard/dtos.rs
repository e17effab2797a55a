use serde::Serialize;
use utoipa::ToSchema;

use crate::features::reports::dtos::{MapMarkerDto, ReportResponseDto, ReportStatsDto};
use crate::features::weather::models::WeatherReport;

/// Everything the admin dashboard renders in one payload
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardSummaryDto {
    pub stats: ReportStatsDto,
    pub recent_reports: Vec<ReportResponseDto>,
    pub weather: WeatherReport,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardMapDto {
    pub markers: Vec<MapMarkerDto>,
    pub weather: WeatherReport,
}
