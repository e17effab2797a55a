use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::dashboard::dtos::{DashboardMapDto, DashboardSummaryDto};
use crate::features::dashboard::services::DashboardService;
use crate::features::reports::dtos::ReportFilterQuery;
use crate::shared::types::ApiResponse;

fn require_admin(user: &AuthenticatedUser) -> Result<()> {
    if !user.is_admin() {
        return Err(AppError::Forbidden(
            "Admin access required".to_string(),
        ));
    }
    Ok(())
}

/// Admin dashboard summary
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "dashboard",
    responses(
        (status = 200, description = "Dashboard summary", body = ApiResponse<DashboardSummaryDto>),
        (status = 403, description = "Admin access required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_summary(
    user: AuthenticatedUser,
    State(service): State<Arc<DashboardService>>,
) -> Result<Json<ApiResponse<DashboardSummaryDto>>> {
    require_admin(&user)?;
    let summary = service.summary().await?;
    Ok(Json(ApiResponse::success(Some(summary), None, None)))
}

/// Admin map view: markers plus the weather overlay
#[utoipa::path(
    get,
    path = "/api/dashboard/map",
    tag = "dashboard",
    params(ReportFilterQuery),
    responses(
        (status = 200, description = "Map markers and weather", body = ApiResponse<DashboardMapDto>),
        (status = 403, description = "Admin access required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_map(
    user: AuthenticatedUser,
    State(service): State<Arc<DashboardService>>,
    Query(filter): Query<ReportFilterQuery>,
) -> Result<Json<ApiResponse<DashboardMapDto>>> {
    require_admin(&user)?;
    let map = service.map(&filter).await?;
    Ok(Json(ApiResponse::success(Some(map), None, None)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::dashboard::routes;
    use crate::features::geo::models::Coordinates;
    use crate::features::reports::services::ReportService;
    use crate::features::weather::services::MockWeatherProvider;
    use crate::shared::test_helpers::{with_admin_auth, with_citizen_auth};
    use axum_test::TestServer;
    use std::sync::Arc;

    fn dashboard_router() -> axum::Router {
        let service = Arc::new(DashboardService::new(
            Arc::new(ReportService::seeded()),
            Arc::new(MockWeatherProvider),
            Coordinates::new(40.7128, -74.0060),
        ));
        routes::protected_routes(service)
    }

    #[tokio::test]
    async fn citizens_cannot_open_the_dashboard() {
        let server = TestServer::new(with_citizen_auth(dashboard_router())).unwrap();
        let response = server.get("/api/dashboard/summary").await;
        response.assert_status_forbidden();
    }

    #[tokio::test]
    async fn admins_get_the_full_summary() {
        let server = TestServer::new(with_admin_auth(dashboard_router())).unwrap();
        let response = server.get("/api/dashboard/summary").await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["stats"]["total"], 4);
        assert_eq!(body["data"]["weather"]["description"], "Light rain");
        assert_eq!(body["data"]["weather"]["flood_risk"], "medium");
    }

    #[tokio::test]
    async fn map_serves_markers_and_weather() {
        let server = TestServer::new(with_admin_auth(dashboard_router())).unwrap();
        let response = server
            .get("/api/dashboard/map")
            .add_query_param("severity", "high")
            .await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["data"]["markers"].as_array().unwrap().len(), 2);
    }
}
