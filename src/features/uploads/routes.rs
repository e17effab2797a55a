use axum::{routing::post, Router};
use std::sync::Arc;

use crate::features::uploads::handlers;
use crate::features::uploads::services::UploadPipeline;

/// Upload routes (require a valid bearer token)
pub fn protected_routes(pipeline: Arc<UploadPipeline>) -> Router {
    Router::new()
        .route("/api/uploads", post(handlers::upload_image))
        .with_state(pipeline)
}
