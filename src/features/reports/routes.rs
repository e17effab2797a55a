use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

use crate::features::reports::handlers::{report_handler, wizard_handler};
use crate::features::reports::services::{ReportService, WizardService};

/// Report CRUD and projection routes (require a valid bearer token)
pub fn protected_routes(service: Arc<ReportService>) -> Router {
    Router::new()
        .route(
            "/api/reports",
            get(report_handler::list_reports).post(report_handler::create_report),
        )
        .route("/api/reports/stats", get(report_handler::report_stats))
        .route("/api/reports/markers", get(report_handler::report_markers))
        .route(
            "/api/reports/{id}",
            get(report_handler::get_report)
                .put(report_handler::update_report)
                .delete(report_handler::delete_report),
        )
        .with_state(service)
}

/// Wizard session routes (require a valid bearer token)
pub fn wizard_routes(service: Arc<WizardService>) -> Router {
    Router::new()
        .route("/api/wizard", post(wizard_handler::start_wizard))
        .route("/api/wizard/{id}", get(wizard_handler::get_wizard))
        .route("/api/wizard/{id}/details", put(wizard_handler::submit_details))
        .route("/api/wizard/{id}/images", post(wizard_handler::attach_image))
        .route("/api/wizard/{id}/location", put(wizard_handler::set_location))
        .route(
            "/api/wizard/{id}/location/detect",
            post(wizard_handler::detect_location),
        )
        .route("/api/wizard/{id}/back", post(wizard_handler::back))
        .route("/api/wizard/{id}/submit", post(wizard_handler::submit_wizard))
        .route("/api/wizard/{id}/reset", post(wizard_handler::reset_wizard))
        .with_state(service)
}
