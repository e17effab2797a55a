use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::analysis::{dtos as analysis_dtos, handlers as analysis_handlers};
use crate::features::auth;
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::geo::handlers as geo_handlers;
use crate::features::reports::{
    dtos as reports_dtos, handlers as reports_handlers, models as reports_models,
};
use crate::features::uploads::{dtos as uploads_dtos, handlers as uploads_handlers};
use crate::features::weather::{handlers as weather_handlers, models as weather_models};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::register,
        auth::handlers::login,
        auth::handlers::logout,
        auth::handlers::verify,
        auth::handlers::get_me,
        // Reports
        reports_handlers::report_handler::list_reports,
        reports_handlers::report_handler::get_report,
        reports_handlers::report_handler::create_report,
        reports_handlers::report_handler::update_report,
        reports_handlers::report_handler::delete_report,
        reports_handlers::report_handler::report_stats,
        reports_handlers::report_handler::report_markers,
        // Wizard
        reports_handlers::wizard_handler::start_wizard,
        reports_handlers::wizard_handler::get_wizard,
        reports_handlers::wizard_handler::submit_details,
        reports_handlers::wizard_handler::attach_image,
        reports_handlers::wizard_handler::set_location,
        reports_handlers::wizard_handler::detect_location,
        reports_handlers::wizard_handler::back,
        reports_handlers::wizard_handler::submit_wizard,
        reports_handlers::wizard_handler::reset_wizard,
        // Uploads
        uploads_handlers::upload_image,
        // AI analysis
        analysis_handlers::analyze_image,
        analysis_handlers::estimate_materials,
        // Location
        geo_handlers::current_location,
        // Weather
        weather_handlers::current_weather,
        // Dashboard
        dashboard_handlers::get_summary,
        dashboard_handlers::get_map,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Auth
            auth::model::AuthenticatedUser,
            auth::dtos::RegisterRequestDto,
            auth::dtos::LoginRequestDto,
            auth::dtos::AuthResponseDto,
            auth::dtos::AuthUserDto,
            auth::dtos::MeResponseDto,
            auth::dtos::LogoutResponseDto,
            ApiResponse<auth::dtos::AuthResponseDto>,
            ApiResponse<auth::dtos::MeResponseDto>,
            ApiResponse<auth::dtos::LogoutResponseDto>,
            // Reports
            reports_models::IssueType,
            reports_models::ReportStatus,
            reports_models::ReportSeverity,
            reports_models::WizardStep,
            reports_models::ReportDraft,
            reports_models::ImageRef,
            reports_dtos::CreateReportDto,
            reports_dtos::UpdateReportDto,
            reports_dtos::ReportResponseDto,
            reports_dtos::ReportStatsDto,
            reports_dtos::MapMarkerDto,
            reports_dtos::WizardSessionDto,
            reports_dtos::WizardDetailsDto,
            reports_dtos::WizardLocationDto,
            reports_dtos::WizardConfirmationDto,
            ApiResponse<Vec<reports_dtos::ReportResponseDto>>,
            ApiResponse<reports_dtos::ReportResponseDto>,
            ApiResponse<reports_dtos::ReportStatsDto>,
            ApiResponse<Vec<reports_dtos::MapMarkerDto>>,
            ApiResponse<reports_dtos::WizardSessionDto>,
            ApiResponse<reports_dtos::WizardConfirmationDto>,
            // Uploads
            uploads_dtos::UploadImageDto,
            uploads_dtos::UploadedImageResponseDto,
            ApiResponse<uploads_dtos::UploadedImageResponseDto>,
            // AI analysis
            analysis_dtos::AnalyzeImageRequestDto,
            analysis_dtos::AnalysisResponseDto,
            analysis_dtos::MaterialEstimateRequestDto,
            analysis_dtos::MaterialEstimateResponseDto,
            ApiResponse<analysis_dtos::AnalysisResponseDto>,
            ApiResponse<analysis_dtos::MaterialEstimateResponseDto>,
            // Location
            geo_handlers::CurrentLocationDto,
            ApiResponse<geo_handlers::CurrentLocationDto>,
            // Weather
            weather_models::WeatherReport,
            weather_models::FloodRisk,
            ApiResponse<weather_models::WeatherReport>,
            // Dashboard
            dashboard_dtos::DashboardSummaryDto,
            dashboard_dtos::DashboardMapDto,
            ApiResponse<dashboard_dtos::DashboardSummaryDto>,
            ApiResponse<dashboard_dtos::DashboardMapDto>,
        )
    ),
    modifiers(&SecurityAddon),
    info(
        title = "SURRS API",
        version = "0.1.0",
        description = "API documentation for the Smart Urban Road Repair System",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
