use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{
    AuthResponseDto, AuthUserDto, LoginRequestDto, RegisterRequestDto,
};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::services::token_service::TokenService;
use crate::shared::constants::{ROLE_ADMIN, ROLE_CITIZEN};

/// In-memory user record. This is a mock auth store: passwords are held
/// verbatim and the registry is lost on restart.
#[derive(Debug, Clone)]
struct UserRecord {
    id: String,
    name: String,
    email: String,
    password: String,
    roles: Vec<String>,
}

/// Service for authentication operations (register, login, logout)
pub struct AuthService {
    users: RwLock<HashMap<String, UserRecord>>,
    token_service: Arc<TokenService>,
}

impl AuthService {
    pub fn new(token_service: Arc<TokenService>) -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            token_service,
        }
    }

    /// Create the service pre-loaded with the demo accounts
    pub async fn with_demo_users(token_service: Arc<TokenService>) -> Self {
        let service = Self::new(token_service);
        {
            let mut users = service.users.write().await;
            for record in demo_users() {
                users.insert(record.email.clone(), record);
            }
        }
        service
    }

    /// Register a new user and log them in
    pub async fn register(&self, dto: RegisterRequestDto) -> Result<AuthResponseDto> {
        let roles = match dto.role.as_deref() {
            None | Some("") | Some(ROLE_CITIZEN) => vec![ROLE_CITIZEN.to_string()],
            Some(ROLE_ADMIN) => vec![ROLE_ADMIN.to_string()],
            Some(other) => {
                return Err(AppError::Validation(format!("Unknown role: {}", other)));
            }
        };

        let record = UserRecord {
            id: Uuid::new_v4().to_string(),
            name: dto.name,
            email: dto.email.to_lowercase(),
            password: dto.password,
            roles,
        };

        {
            let mut users = self.users.write().await;
            if users.contains_key(&record.email) {
                return Err(AppError::Conflict(
                    "An account with this email already exists".to_string(),
                ));
            }
            users.insert(record.email.clone(), record.clone());
        }

        tracing::info!("Registered user: {}", record.email);
        self.issue_response(&record)
    }

    /// Login with email and password
    pub async fn login(&self, dto: LoginRequestDto) -> Result<AuthResponseDto> {
        let record = {
            let users = self.users.read().await;
            users.get(&dto.email.to_lowercase()).cloned()
        }
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

        if record.password != dto.password {
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        tracing::info!("User logged in: {}", record.email);
        self.issue_response(&record)
    }

    /// Revoke the presented token (logout)
    pub async fn logout(&self, token: &str) -> Result<()> {
        self.token_service.revoke(token).await
    }

    fn issue_response(&self, record: &UserRecord) -> Result<AuthResponseDto> {
        let user = AuthenticatedUser {
            sub: record.id.clone(),
            email: record.email.clone(),
            name: record.name.clone(),
            roles: record.roles.clone(),
        };
        let issued = self.token_service.issue(&user)?;

        Ok(AuthResponseDto {
            access_token: issued.access_token,
            token_type: issued.token_type,
            expires_in: issued.expires_in,
            user: AuthUserDto {
                id: record.id.clone(),
                name: record.name.clone(),
                email: record.email.clone(),
                roles: record.roles.clone(),
            },
        })
    }
}

/// The two accounts the demo login screen pre-fills
fn demo_users() -> Vec<UserRecord> {
    vec![
        UserRecord {
            id: Uuid::new_v4().to_string(),
            name: "John Doe".to_string(),
            email: "john.doe@example.com".to_string(),
            password: "password123".to_string(),
            roles: vec![ROLE_CITIZEN.to_string()],
        },
        UserRecord {
            id: Uuid::new_v4().to_string(),
            name: "City Works Admin".to_string(),
            email: "admin@cityworks.gov".to_string(),
            password: "admin123".to_string(),
            roles: vec![ROLE_ADMIN.to_string()],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::AuthConfig;
    use fake::faker::internet::en::SafeEmail;
    use fake::Fake;
    use std::time::Duration;

    fn test_auth_service() -> AuthService {
        let tokens = Arc::new(TokenService::new(AuthConfig {
            jwt_secret: "test-secret".to_string(),
            token_ttl: Duration::from_secs(3600),
        }));
        AuthService::new(tokens)
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let service = test_auth_service();
        let email: String = SafeEmail().fake();

        let registered = service
            .register(RegisterRequestDto {
                name: "Test User".to_string(),
                email: email.clone(),
                password: "hunter2hunter2".to_string(),
                role: None,
            })
            .await
            .unwrap();
        assert_eq!(registered.user.roles, vec![ROLE_CITIZEN.to_string()]);

        let logged_in = service
            .login(LoginRequestDto {
                email,
                password: "hunter2hunter2".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(logged_in.user.id, registered.user.id);
        assert!(!logged_in.access_token.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_registration_conflicts() {
        let service = test_auth_service();
        let dto = || RegisterRequestDto {
            name: "Test User".to_string(),
            email: "dup@example.com".to_string(),
            password: "hunter2hunter2".to_string(),
            role: None,
        };

        service.register(dto()).await.unwrap();
        let err = service.register(dto()).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_wrong_password_is_unauthorized() {
        let service = test_auth_service();
        service
            .register(RegisterRequestDto {
                name: "Test User".to_string(),
                email: "pw@example.com".to_string(),
                password: "correct-password".to_string(),
                role: None,
            })
            .await
            .unwrap();

        let err = service
            .login(LoginRequestDto {
                email: "pw@example.com".to_string(),
                password: "wrong-password".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_demo_accounts_can_log_in() {
        let tokens = Arc::new(TokenService::new(AuthConfig {
            jwt_secret: "test-secret".to_string(),
            token_ttl: Duration::from_secs(3600),
        }));
        let service = AuthService::with_demo_users(tokens).await;

        let citizen = service
            .login(LoginRequestDto {
                email: "john.doe@example.com".to_string(),
                password: "password123".to_string(),
            })
            .await
            .unwrap();
        assert!(citizen.user.roles.contains(&ROLE_CITIZEN.to_string()));

        let admin = service
            .login(LoginRequestDto {
                email: "admin@cityworks.gov".to_string(),
                password: "admin123".to_string(),
            })
            .await
            .unwrap();
        assert!(admin.user.roles.contains(&ROLE_ADMIN.to_string()));
    }
}
