use axum::{routing::post, Router};
use std::sync::Arc;

use crate::features::analysis::handlers;
use crate::features::analysis::services::ImageAnalyzer;

/// AI analysis routes (require a valid bearer token)
pub fn protected_routes(analyzer: Arc<dyn ImageAnalyzer>) -> Router {
    Router::new()
        .route("/api/ai/analyze", post(handlers::analyze_image))
        .route("/api/ai/estimate-materials", post(handlers::estimate_materials))
        .with_state(analyzer)
}
