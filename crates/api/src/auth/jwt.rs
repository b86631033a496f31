//! Bearer token decoding.
//!
//! Identities are issued by an external provider as HS256 JWTs. This service
//! holds the shared secret and only checks signature, expiry, and that the
//! role claim names a role the forum knows about.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use quanda_core::roles::VALID_ROLES;
use quanda_core::types::DbId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payload carried by every bearer token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The user's id in `users`.
    pub sub: DbId,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

impl Claims {
    /// Claims for `user_id` valid for `ttl` from now.
    pub fn for_user(user_id: DbId, role: &str, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            role: role.to_string(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token rejected: {0}")]
    Rejected(#[from] jsonwebtoken::errors::Error),

    #[error("unknown role '{0}'")]
    UnknownRole(String),
}

/// Shared-secret settings for token checks.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Clock skew tolerated on `exp`, in seconds.
    pub leeway_secs: u64,
}

const DEFAULT_LEEWAY_SECS: u64 = 60;

impl JwtConfig {
    /// Reads `JWT_SECRET` (required, non-empty) and `JWT_LEEWAY_SECS`
    /// (default 60).
    ///
    /// # Panics
    ///
    /// Panics when the secret is missing or empty, or the leeway is not a
    /// non-negative integer.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let leeway_secs = match std::env::var("JWT_LEEWAY_SECS") {
            Ok(raw) => raw
                .parse()
                .expect("JWT_LEEWAY_SECS must be a non-negative integer"),
            Err(_) => DEFAULT_LEEWAY_SECS,
        };

        Self {
            secret,
            leeway_secs,
        }
    }
}

/// Verify `token` and return its claims.
pub fn decode_claims(token: &str, config: &JwtConfig) -> Result<Claims, TokenError> {
    let mut validation = Validation::default();
    validation.leeway = config.leeway_secs;

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?
    .claims;

    if !VALID_ROLES.contains(&claims.role.as_str()) {
        return Err(TokenError::UnknownRole(claims.role));
    }
    Ok(claims)
}

/// Sign `claims` with the shared secret. Used by local tooling and tests
/// standing in for the identity provider.
pub fn sign_claims(claims: &Claims, config: &JwtConfig) -> Result<String, TokenError> {
    Ok(encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            leeway_secs: 0,
        }
    }

    #[test]
    fn signed_claims_decode() {
        let claims = Claims::for_user(42, "admin", Duration::minutes(5));
        let token = sign_claims(&claims, &config()).unwrap();

        let decoded = decode_claims(&token, &config()).unwrap();
        assert_eq!(decoded.sub, 42);
        assert_eq!(decoded.role, "admin");
        assert!(decoded.exp > decoded.iat);
    }

    #[test]
    fn expired_token_is_rejected() {
        let claims = Claims::for_user(1, "member", Duration::minutes(-10));
        let token = sign_claims(&claims, &config()).unwrap();

        assert_matches!(decode_claims(&token, &config()), Err(TokenError::Rejected(_)));
    }

    #[test]
    fn foreign_secret_is_rejected() {
        let claims = Claims::for_user(1, "member", Duration::minutes(5));
        let token = sign_claims(&claims, &config()).unwrap();
        let other = JwtConfig {
            secret: "another-secret".to_string(),
            ..config()
        };

        assert_matches!(decode_claims(&token, &other), Err(TokenError::Rejected(_)));
    }

    #[test]
    fn unknown_role_is_rejected() {
        let claims = Claims::for_user(1, "moderator", Duration::minutes(5));
        let token = sign_claims(&claims, &config()).unwrap();

        assert_matches!(
            decode_claims(&token, &config()),
            Err(TokenError::UnknownRole(role)) if role == "moderator"
        );
    }
}
