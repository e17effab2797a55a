use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::reports::dtos::{
    WizardConfirmationDto, WizardDetailsDto, WizardLocationDto, WizardSessionDto,
};
use crate::features::reports::services::WizardService;
use crate::features::uploads::handlers::read_image_field;
use crate::shared::types::ApiResponse;

/// Start a new wizard session
#[utoipa::path(
    post,
    path = "/api/wizard",
    tag = "wizard",
    responses(
        (status = 201, description = "Session started", body = ApiResponse<WizardSessionDto>)
    ),
    security(("bearer_auth" = []))
)]
pub async fn start_wizard(
    State(service): State<Arc<WizardService>>,
) -> Result<(StatusCode, Json<ApiResponse<WizardSessionDto>>)> {
    let session = service.start().await;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(session.into()), None, None)),
    ))
}

/// Current state of a wizard session
#[utoipa::path(
    get,
    path = "/api/wizard/{id}",
    tag = "wizard",
    params(("id" = Uuid, Path, description = "Session id")),
    responses(
        (status = 200, description = "Session state", body = ApiResponse<WizardSessionDto>),
        (status = 404, description = "Session not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_wizard(
    State(service): State<Arc<WizardService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<WizardSessionDto>>> {
    let session = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(session.into()), None, None)))
}

/// Fill in the details step and advance
#[utoipa::path(
    put,
    path = "/api/wizard/{id}/details",
    tag = "wizard",
    params(("id" = Uuid, Path, description = "Session id")),
    request_body = WizardDetailsDto,
    responses(
        (status = 200, description = "Advanced to photo & location", body = ApiResponse<WizardSessionDto>),
        (status = 400, description = "Details incomplete"),
        (status = 409, description = "Session is past the details step")
    ),
    security(("bearer_auth" = []))
)]
pub async fn submit_details(
    State(service): State<Arc<WizardService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<WizardDetailsDto>,
) -> Result<Json<ApiResponse<WizardSessionDto>>> {
    let session = service.submit_details(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(session.into()), None, None)))
}

/// Upload and analyze one photo for the draft
#[utoipa::path(
    post,
    path = "/api/wizard/{id}/images",
    tag = "wizard",
    params(("id" = Uuid, Path, description = "Session id")),
    responses(
        (status = 200, description = "Photo attached and analyzed", body = ApiResponse<WizardSessionDto>),
        (status = 400, description = "Invalid or oversized file"),
        (status = 409, description = "Session is not on the photo & location step")
    ),
    security(("bearer_auth" = []))
)]
pub async fn attach_image(
    State(service): State<Arc<WizardService>>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<WizardSessionDto>>> {
    let upload = read_image_field(multipart).await?;
    let session = service.attach_image(id, upload).await?;
    Ok(Json(ApiResponse::success(
        Some(session.into()),
        Some("Photo attached".to_string()),
        None,
    )))
}

/// Set the free-text location
#[utoipa::path(
    put,
    path = "/api/wizard/{id}/location",
    tag = "wizard",
    params(("id" = Uuid, Path, description = "Session id")),
    request_body = WizardLocationDto,
    responses(
        (status = 200, description = "Location set", body = ApiResponse<WizardSessionDto>),
        (status = 400, description = "Location empty")
    ),
    security(("bearer_auth" = []))
)]
pub async fn set_location(
    State(service): State<Arc<WizardService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<WizardLocationDto>,
) -> Result<Json<ApiResponse<WizardSessionDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let session = service.set_location(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(session.into()), None, None)))
}

/// Detect the device position
#[utoipa::path(
    post,
    path = "/api/wizard/{id}/location/detect",
    tag = "wizard",
    params(("id" = Uuid, Path, description = "Session id")),
    responses(
        (status = 200, description = "Position captured", body = ApiResponse<WizardSessionDto>),
        (status = 503, description = "Location unavailable; free text untouched")
    ),
    security(("bearer_auth" = []))
)]
pub async fn detect_location(
    State(service): State<Arc<WizardService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<WizardSessionDto>>> {
    let session = service.detect_location(id).await?;
    Ok(Json(ApiResponse::success(Some(session.into()), None, None)))
}

/// Step back to the details step
#[utoipa::path(
    post,
    path = "/api/wizard/{id}/back",
    tag = "wizard",
    params(("id" = Uuid, Path, description = "Session id")),
    responses(
        (status = 200, description = "Back on the details step", body = ApiResponse<WizardSessionDto>),
        (status = 409, description = "Session already submitted")
    ),
    security(("bearer_auth" = []))
)]
pub async fn back(
    State(service): State<Arc<WizardService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<WizardSessionDto>>> {
    let session = service.back(id).await?;
    Ok(Json(ApiResponse::success(Some(session.into()), None, None)))
}

/// Submit the draft as a report
#[utoipa::path(
    post,
    path = "/api/wizard/{id}/submit",
    tag = "wizard",
    params(("id" = Uuid, Path, description = "Session id")),
    responses(
        (status = 201, description = "Report submitted", body = ApiResponse<WizardConfirmationDto>),
        (status = 400, description = "Photo or location missing"),
        (status = 409, description = "Session not ready for submission")
    ),
    security(("bearer_auth" = []))
)]
pub async fn submit_wizard(
    user: AuthenticatedUser,
    State(service): State<Arc<WizardService>>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<ApiResponse<WizardConfirmationDto>>)> {
    let confirmation = service.submit(id, &user.name).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(confirmation),
            Some("Report submitted successfully".to_string()),
            None,
        )),
    ))
}

/// Clear the draft and return to the details step
#[utoipa::path(
    post,
    path = "/api/wizard/{id}/reset",
    tag = "wizard",
    params(("id" = Uuid, Path, description = "Session id")),
    responses(
        (status = 200, description = "Draft cleared", body = ApiResponse<WizardSessionDto>),
        (status = 404, description = "Session not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn reset_wizard(
    State(service): State<Arc<WizardService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<WizardSessionDto>>> {
    let session = service.reset(id).await?;
    Ok(Json(ApiResponse::success(Some(session.into()), None, None)))
}
