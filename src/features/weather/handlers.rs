use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::core::error::Result;
use crate::features::weather::models::WeatherReport;
use crate::features::weather::services::WeatherProvider;
use crate::shared::types::ApiResponse;

#[derive(Debug, Deserialize, IntoParams)]
pub struct WeatherQuery {
    pub lat: f64,
    pub lng: f64,
}

/// Current conditions for a position
#[utoipa::path(
    get,
    path = "/api/weather/current",
    tag = "weather",
    params(WeatherQuery),
    responses(
        (status = 200, description = "Current conditions", body = ApiResponse<WeatherReport>)
    ),
    security(("bearer_auth" = []))
)]
pub async fn current_weather(
    State(provider): State<Arc<dyn WeatherProvider>>,
    Query(query): Query<WeatherQuery>,
) -> Result<impl IntoResponse> {
    let report = provider.current(query.lat, query.lng).await?;

    Ok(Json(ApiResponse::success(Some(report), None, None)))
}
