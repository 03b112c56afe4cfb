//! HS256 token issuing and verification
//!
//! Tokens are stateless apart from the revocation list: a logged-out token id
//! is remembered until the token would have expired anyway.

use crate::auth::models::{AuthUser, JwtClaims};
use atrium_core::models::{User, UserRole};
use atrium_core::{AppError, Config};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Revoked token ids with their expiry timestamp.
#[derive(Clone, Default)]
pub struct TokenBlacklist {
    inner: Arc<Mutex<HashMap<String, i64>>>,
}

impl TokenBlacklist {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn revoke(&self, jti: &str, expires_at: i64) {
        let mut guard = self.inner.lock().await;
        let now = Utc::now().timestamp();
        guard.retain(|_, exp| *exp > now);
        guard.insert(jti.to_string(), expires_at);
    }

    pub async fn is_revoked(&self, jti: &str) -> bool {
        let guard = self.inner.lock().await;
        guard.contains_key(jti)
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }
}

/// Signing secret, token lifetime and revocation list, shared through app state.
#[derive(Clone)]
pub struct AuthContext {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_hours: i64,
    blacklist: TokenBlacklist,
}

impl AuthContext {
    pub fn new(secret: &str, expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiry_hours,
            blacklist: TokenBlacklist::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.jwt_secret(), config.jwt_expiry_hours())
    }

    pub fn expiry_seconds(&self) -> i64 {
        self.expiry_hours * 3600
    }

    pub fn issue(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.expiry_hours)).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    /// Decode and check a bearer token, including the revocation list.
    pub async fn verify(&self, token: &str) -> Result<AuthUser, AppError> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<JwtClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))?;
        let claims = data.claims;

        if self.blacklist.is_revoked(&claims.jti).await {
            return Err(AppError::Unauthorized("Token has been revoked".to_string()));
        }

        let role: UserRole = claims
            .role
            .parse()
            .map_err(|_| AppError::Unauthorized(format!("Unknown role '{}'", claims.role)))?;

        Ok(AuthUser {
            user_id: claims.sub,
            email: claims.email,
            role,
            token_id: claims.jti,
            expires_at: claims.exp,
        })
    }

    pub async fn revoke(&self, user: &AuthUser) {
        self.blacklist.revoke(&user.token_id, user.expires_at).await;
        tracing::info!(user_id = user.user_id, "Token revoked");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn user() -> User {
        let now = Utc::now();
        User {
            id: 4,
            email: "editor@example.org".to_string(),
            password_hash: String::new(),
            name: None,
            role: "editor".to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn issued_token_verifies() {
        let auth = AuthContext::new(SECRET, 1);
        let token = auth.issue(&user()).unwrap();

        let who = auth.verify(&token).await.unwrap();
        assert_eq!(who.user_id, 4);
        assert_eq!(who.role, UserRole::Editor);
    }

    #[tokio::test]
    async fn token_signed_with_other_secret_is_rejected() {
        let token = AuthContext::new(SECRET, 1).issue(&user()).unwrap();
        let other = AuthContext::new("ffffffffffffffffffffffffffffffff", 1);

        assert!(matches!(
            other.verify(&token).await,
            Err(AppError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn revoked_token_is_rejected() {
        let auth = AuthContext::new(SECRET, 1);
        let token = auth.issue(&user()).unwrap();
        let who = auth.verify(&token).await.unwrap();

        auth.revoke(&who).await;

        assert!(auth.verify(&token).await.is_err());
    }

    #[tokio::test]
    async fn blacklist_prunes_expired_entries() {
        let blacklist = TokenBlacklist::new();
        let past = Utc::now().timestamp() - 10;
        blacklist.revoke("old", past).await;
        blacklist.revoke("new", past + 3600).await;

        assert!(!blacklist.is_revoked("old").await);
        assert_eq!(blacklist.len().await, 1);
    }
}
