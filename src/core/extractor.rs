use axum::{
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Request},
    http::request::Parts,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;

/// JSON extractor that reports body problems through the ApiResponse
/// envelope instead of axum's plain-text rejections.
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        Json::<T>::from_request(req, state)
            .await
            .map(|Json(value)| Self(value))
            .map_err(AppJsonRejection)
    }
}

pub struct AppJsonRejection(JsonRejection);

impl IntoResponse for AppJsonRejection {
    fn into_response(self) -> Response {
        let error = match self.0 {
            // The body parsed but does not fit the target DTO; surface it
            // like any other validation failure.
            JsonRejection::JsonDataError(err) => AppError::Validation(format!(
                "Request body does not match the expected shape: {}",
                err
            )),
            JsonRejection::JsonSyntaxError(err) => {
                AppError::BadRequest(format!("Request body is not valid JSON: {}", err))
            }
            JsonRejection::MissingJsonContentType(_) => AppError::BadRequest(
                "Request must be sent with content type application/json".to_string(),
            ),
            _ => AppError::BadRequest("Unreadable request body".to_string()),
        };
        error.into_response()
    }
}

/// The identity the auth middleware places in request extensions.
/// A protected handler reached without one answers 401.
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        routing::{get, post},
        Router,
    };
    use axum_test::TestServer;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct EchoDto {
        name: String,
    }

    async fn echo(AppJson(dto): AppJson<EchoDto>) -> String {
        dto.name
    }

    async fn whoami(user: AuthenticatedUser) -> String {
        user.name
    }

    fn server() -> TestServer {
        let router = Router::new()
            .route("/echo", post(echo))
            .route("/whoami", get(whoami));
        TestServer::new(router).unwrap()
    }

    #[tokio::test]
    async fn malformed_json_is_a_bad_request_in_the_envelope() {
        let server = server();
        let response = server
            .post("/echo")
            .bytes("{not json".into())
            .content_type("application/json")
            .await;
        response.assert_status_bad_request();

        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], false);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains("not valid JSON"));
    }

    #[tokio::test]
    async fn mismatched_shape_reads_as_a_validation_error() {
        let server = server();
        let response = server
            .post("/echo")
            .json(&serde_json::json!({ "name": 42 }))
            .await;
        response.assert_status_bad_request();

        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], false);
        assert!(body["errors"].is_array());
    }

    #[tokio::test]
    async fn missing_identity_is_unauthorized() {
        let server = server();
        let response = server.get("/whoami").await;
        response.assert_status_unauthorized();
    }
}
