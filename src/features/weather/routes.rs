use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::weather::handlers;
use crate::features::weather::services::WeatherProvider;

/// Weather routes (require a valid bearer token)
pub fn protected_routes(provider: Arc<dyn WeatherProvider>) -> Router {
    Router::new()
        .route("/api/weather/current", get(handlers::current_weather))
        .with_state(provider)
}
