use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::reports::dtos::{
    CreateReportDto, MapMarkerDto, ReportFilterQuery, ReportResponseDto, ReportStatsDto,
    UpdateReportDto,
};
use crate::features::reports::models::NewReport;
use crate::features::reports::services::ReportService;
use crate::shared::types::{ApiResponse, Meta};

/// List reports, optionally filtered by type and severity
#[utoipa::path(
    get,
    path = "/api/reports",
    tag = "reports",
    params(ReportFilterQuery),
    responses(
        (status = 200, description = "Filtered report list", body = ApiResponse<Vec<ReportResponseDto>>),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_reports(
    State(service): State<Arc<ReportService>>,
    Query(filter): Query<ReportFilterQuery>,
) -> Result<Json<ApiResponse<Vec<ReportResponseDto>>>> {
    let reports = service.list(&filter).await;
    let total = reports.len() as i64;
    let items: Vec<ReportResponseDto> = reports.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

/// Get a single report
#[utoipa::path(
    get,
    path = "/api/reports/{id}",
    tag = "reports",
    params(("id" = i64, Path, description = "Report id")),
    responses(
        (status = 200, description = "Report detail", body = ApiResponse<ReportResponseDto>),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_report(
    State(service): State<Arc<ReportService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    let report = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(report.into()), None, None)))
}

/// Create a report directly, outside the wizard
#[utoipa::path(
    post,
    path = "/api/reports",
    tag = "reports",
    request_body = CreateReportDto,
    responses(
        (status = 201, description = "Report created", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "Validation error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_report(
    user: AuthenticatedUser,
    State(service): State<Arc<ReportService>>,
    AppJson(dto): AppJson<CreateReportDto>,
) -> Result<(StatusCode, Json<ApiResponse<ReportResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let report = service
        .create(NewReport {
            issue_type: dto.issue_type,
            description: dto.description,
            location_text: dto.location,
            latitude: dto.latitude,
            longitude: dto.longitude,
            severity: dto.severity,
            reported_by: user.name,
            material_estimate: dto.material_estimate,
            estimated_cost: dto.estimated_cost,
            image_urls: dto.image_urls,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(report.into()),
            Some("Report created successfully".to_string()),
            None,
        )),
    ))
}

/// Update a report's fields
#[utoipa::path(
    put,
    path = "/api/reports/{id}",
    tag = "reports",
    params(("id" = i64, Path, description = "Report id")),
    request_body = UpdateReportDto,
    responses(
        (status = 200, description = "Report updated", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "No fields to update"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_report(
    State(service): State<Arc<ReportService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateReportDto>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    if dto.is_empty() {
        return Err(AppError::BadRequest("No fields to update".to_string()));
    }

    let report = service.update(id, &dto).await?;
    Ok(Json(ApiResponse::success(
        Some(report.into()),
        Some("Report updated successfully".to_string()),
        None,
    )))
}

/// Delete a report
#[utoipa::path(
    delete,
    path = "/api/reports/{id}",
    tag = "reports",
    params(("id" = i64, Path, description = "Report id")),
    responses(
        (status = 200, description = "Report deleted"),
        (status = 404, description = "Report not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_report(
    State(service): State<Arc<ReportService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Report deleted successfully".to_string()),
        None,
    )))
}

/// Aggregate counts over the report collection
#[utoipa::path(
    get,
    path = "/api/reports/stats",
    tag = "reports",
    responses(
        (status = 200, description = "Report statistics", body = ApiResponse<ReportStatsDto>)
    ),
    security(("bearer_auth" = []))
)]
pub async fn report_stats(
    State(service): State<Arc<ReportService>>,
) -> Result<Json<ApiResponse<ReportStatsDto>>> {
    let stats = service.stats().await;
    Ok(Json(ApiResponse::success(Some(stats), None, None)))
}

/// Map markers for the filtered report list
#[utoipa::path(
    get,
    path = "/api/reports/markers",
    tag = "reports",
    params(ReportFilterQuery),
    responses(
        (status = 200, description = "Map markers", body = ApiResponse<Vec<MapMarkerDto>>)
    ),
    security(("bearer_auth" = []))
)]
pub async fn report_markers(
    State(service): State<Arc<ReportService>>,
    Query(filter): Query<ReportFilterQuery>,
) -> Result<Json<ApiResponse<Vec<MapMarkerDto>>>> {
    let markers = service.map_markers(&filter).await;
    let total = markers.len() as i64;
    Ok(Json(ApiResponse::success(
        Some(markers),
        None,
        Some(Meta { total }),
    )))
}

#[cfg(test)]
mod tests {
    use crate::features::reports::routes;
    use crate::features::reports::services::ReportService;
    use crate::shared::test_helpers::with_citizen_auth;
    use axum_test::TestServer;
    use std::sync::Arc;

    fn server() -> TestServer {
        let router = with_citizen_auth(routes::protected_routes(Arc::new(
            ReportService::seeded(),
        )));
        TestServer::new(router).unwrap()
    }

    #[tokio::test]
    async fn list_reports_applies_the_type_filter() {
        let server = server();
        let response = server.get("/api/reports").add_query_param("type", "pothole").await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["meta"]["total"], 1);
        assert_eq!(body["data"][0]["issue_type_label"], "Pothole");
    }

    #[tokio::test]
    async fn get_unknown_report_is_404() {
        let server = server();
        let response = server.get("/api/reports/999").await;
        response.assert_status_not_found();

        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn stats_endpoint_serves_the_seeded_counts() {
        let server = server();
        let response = server.get("/api/reports/stats").await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["total"], 4);
        assert_eq!(body["data"]["total_estimated_cost"], 2110.0);
    }

    #[tokio::test]
    async fn markers_endpoint_serves_colored_pins() {
        let server = server();
        let response = server.get("/api/reports/markers").await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["meta"]["total"], 4);
        assert_eq!(body["data"][0]["color"], "#ef4444");
    }
}
