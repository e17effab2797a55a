use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::dashboard::handlers;
use crate::features::dashboard::services::DashboardService;

/// Dashboard routes (require a valid bearer token with the admin role)
pub fn protected_routes(service: Arc<DashboardService>) -> Router {
    Router::new()
        .route("/api/dashboard/summary", get(handlers::get_summary))
        .route("/api/dashboard/map", get(handlers::get_map))
        .with_state(service)
}
