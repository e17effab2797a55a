use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::geo::handlers;
use crate::features::geo::services::LocationProvider;

/// Location routes (require a valid bearer token)
pub fn protected_routes(provider: Arc<dyn LocationProvider>) -> Router {
    Router::new()
        .route("/api/location/current", get(handlers::current_location))
        .with_state(provider)
}
