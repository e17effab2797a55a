use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::core::error::Result;
use crate::features::geo::services::LocationProvider;
use crate::shared::types::ApiResponse;

#[derive(Debug, Serialize, ToSchema)]
pub struct CurrentLocationDto {
    pub latitude: f64,
    pub longitude: f64,
    pub location_text: String,
}

/// Current device position
#[utoipa::path(
    get,
    path = "/api/location/current",
    tag = "location",
    responses(
        (status = 200, description = "Current position", body = ApiResponse<CurrentLocationDto>),
        (status = 503, description = "Location unavailable")
    ),
    security(("bearer_auth" = []))
)]
pub async fn current_location(
    State(provider): State<Arc<dyn LocationProvider>>,
) -> Result<impl IntoResponse> {
    let coords = provider.current_location().await?;

    Ok(Json(ApiResponse::success(
        Some(CurrentLocationDto {
            latitude: coords.latitude,
            longitude: coords.longitude,
            location_text: coords.as_location_text(),
        }),
        Some("Location detected".to_string()),
        None,
    )))
}
