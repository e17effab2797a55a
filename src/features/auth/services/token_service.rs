use std::collections::HashSet;

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::{AuthenticatedUser, Claims};

/// An access token freshly minted for a user
pub struct IssuedToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Issues and validates HS256 access tokens. Revocation state lives in
/// memory alongside the rest of the demo: logging out adds the token id to
/// the revoked set, and a revoked or malformed token yields 401 everywhere.
pub struct TokenService {
    config: AuthConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    revoked: RwLock<HashSet<String>>,
}

impl TokenService {
    pub fn new(config: AuthConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
            revoked: RwLock::new(HashSet::new()),
        }
    }

    /// Mint a bearer token for an authenticated user
    pub fn issue(&self, user: &AuthenticatedUser) -> Result<IssuedToken> {
        let now = Utc::now().timestamp();
        let expires_in = self.config.token_ttl.as_secs() as i64;

        let claims = Claims {
            sub: user.sub.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            roles: user.roles.clone(),
            jti: Uuid::new_v4().to_string(),
            iat: now,
            exp: now + expires_in,
        };

        let access_token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))?;

        Ok(IssuedToken {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
        })
    }

    /// Validate a bearer token and return the user it identifies
    pub async fn validate_token(&self, token: &str) -> Result<AuthenticatedUser> {
        let claims = self.decode_claims(token)?;

        if self.revoked.read().await.contains(&claims.jti) {
            return Err(AppError::Unauthorized("Token has been revoked".to_string()));
        }

        Ok(claims.into())
    }

    /// Revoke a token so it can no longer authenticate (logout)
    pub async fn revoke(&self, token: &str) -> Result<()> {
        let claims = self.decode_claims(token)?;
        self.revoked.write().await.insert(claims.jti);
        Ok(())
    }

    fn decode_claims(&self, token: &str) -> Result<Claims> {
        let validation = Validation::default();
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::constants::ROLE_CITIZEN;
    use std::time::Duration;

    fn test_service() -> TokenService {
        TokenService::new(AuthConfig {
            jwt_secret: "test-secret".to_string(),
            token_ttl: Duration::from_secs(3600),
        })
    }

    fn test_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "user-1".to_string(),
            email: "john.doe@example.com".to_string(),
            name: "John Doe".to_string(),
            roles: vec![ROLE_CITIZEN.to_string()],
        }
    }

    #[tokio::test]
    async fn test_issue_and_validate_round_trip() {
        let service = test_service();
        let issued = service.issue(&test_user()).unwrap();
        assert_eq!(issued.token_type, "Bearer");
        assert_eq!(issued.expires_in, 3600);

        let user = service.validate_token(&issued.access_token).await.unwrap();
        assert_eq!(user.sub, "user-1");
        assert_eq!(user.email, "john.doe@example.com");
        assert!(user.is_citizen());
    }

    #[tokio::test]
    async fn test_revoked_token_is_rejected() {
        let service = test_service();
        let issued = service.issue(&test_user()).unwrap();

        service.revoke(&issued.access_token).await.unwrap();

        let err = service
            .validate_token(&issued.access_token)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_garbage_token_is_rejected() {
        let service = test_service();
        let err = service.validate_token("not-a-jwt").await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_token_signed_with_other_secret_is_rejected() {
        let service = test_service();
        let other = TokenService::new(AuthConfig {
            jwt_secret: "different-secret".to_string(),
            token_ttl: Duration::from_secs(3600),
        });
        let issued = other.issue(&test_user()).unwrap();

        let err = service
            .validate_token(&issued.access_token)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
