use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::AppError;
use crate::core::extractor::AppJson;
use crate::features::auth::dtos::{
    AuthResponseDto, LoginRequestDto, LogoutResponseDto, MeResponseDto, RegisterRequestDto,
};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::services::AuthService;
use crate::shared::types::ApiResponse;

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterRequestDto,
    responses(
        (status = 201, description = "Account created", body = ApiResponse<AuthResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<RegisterRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<AuthResponseDto>>), AppError> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let response = service.register(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(response), None, None)),
    ))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<AuthResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<Json<ApiResponse<AuthResponseDto>>, AppError> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let response = service.login(dto).await?;
    Ok(Json(ApiResponse::success(Some(response), None, None)))
}

/// Logout: revoke the presented bearer token
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Token revoked", body = ApiResponse<LogoutResponseDto>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn logout(
    _user: AuthenticatedUser,
    State(service): State<Arc<AuthService>>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<LogoutResponseDto>>, AppError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

    service.logout(token).await?;

    Ok(Json(ApiResponse::success(
        Some(LogoutResponseDto { logged_out: true }),
        Some("Session ended".to_string()),
        None,
    )))
}

/// Verify the presented token (valid if this handler is reached)
#[utoipa::path(
    get,
    path = "/api/auth/verify",
    tag = "auth",
    responses(
        (status = 200, description = "Token is valid", body = ApiResponse<MeResponseDto>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn verify(
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<MeResponseDto>>, AppError> {
    Ok(Json(ApiResponse::success(Some(user.into()), None, None)))
}

/// Get the current user's profile
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "Current user", body = ApiResponse<MeResponseDto>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_me(
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<MeResponseDto>>, AppError> {
    Ok(Json(ApiResponse::success(Some(user.into()), None, None)))
}

#[cfg(test)]
mod tests {
    use crate::core::config::AuthConfig;
    use crate::features::auth::routes;
    use crate::features::auth::services::{AuthService, TokenService};
    use axum_test::TestServer;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;

    async fn server() -> TestServer {
        let tokens = Arc::new(TokenService::new(AuthConfig {
            jwt_secret: "test-secret".to_string(),
            token_ttl: Duration::from_secs(3600),
        }));
        let service = Arc::new(AuthService::with_demo_users(tokens).await);
        TestServer::new(routes::public_routes(service)).unwrap()
    }

    #[tokio::test]
    async fn demo_citizen_can_log_in() {
        let server = server().await;
        let response = server
            .post("/api/auth/login")
            .json(&json!({
                "email": "john.doe@example.com",
                "password": "password123"
            }))
            .await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["token_type"], "Bearer");
        assert_eq!(body["data"]["user"]["roles"][0], "citizen");
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let server = server().await;
        let response = server
            .post("/api/auth/login")
            .json(&json!({
                "email": "admin@cityworks.gov",
                "password": "wrong"
            }))
            .await;
        response.assert_status_unauthorized();
    }
}
