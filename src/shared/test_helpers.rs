#[cfg(test)]
use crate::features::auth::model::AuthenticatedUser;

#[cfg(test)]
use crate::shared::constants::{ROLE_ADMIN, ROLE_CITIZEN};

#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};

#[cfg(test)]
pub fn create_citizen_user() -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "test-citizen".to_string(),
        email: "john.doe@example.com".to_string(),
        name: "John Doe".to_string(),
        roles: vec![ROLE_CITIZEN.to_string()],
    }
}

#[cfg(test)]
pub fn create_admin_user() -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "test-admin".to_string(),
        email: "admin@cityworks.gov".to_string(),
        name: "City Admin".to_string(),
        roles: vec![ROLE_ADMIN.to_string()],
    }
}

#[cfg(test)]
async fn inject_citizen_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_citizen_user());
    next.run(request).await
}

#[cfg(test)]
async fn inject_admin_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_admin_user());
    next.run(request).await
}

#[cfg(test)]
pub fn with_citizen_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_citizen_middleware))
}

#[cfg(test)]
#[allow(dead_code)]
pub fn with_admin_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_admin_middleware))
}
