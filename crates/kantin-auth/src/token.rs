//! Session token issuance and verification.
//!
//! Tokens are compact HS256 JWTs signed with the process-wide symmetric
//! secret from [`AuthConfig`]. Verification is purely cryptographic and
//! structural — no store is consulted; resolving the subject against
//! the live user record is the session authenticator's job.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use kantin_core::models::user::{Role, User};
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::error::AuthError;

/// Claims embedded in every session token.
///
/// Ephemeral: derived from a [`User`] at issue time and never
/// persisted. Claims are not refreshed if the user record is later
/// mutated — downstream consumers read the live record instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject — user ID (UUID string).
    pub sub: String,
    /// Email at issue time.
    pub email: String,
    /// Role at issue time.
    pub role: Role,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
}

/// Issue a signed session token for the given user.
pub fn issue_session_token(user: &User, config: &AuthConfig) -> Result<String, AuthError> {
    let now = Utc::now().timestamp();
    let claims = SessionClaims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        role: user.role,
        iat: now,
        exp: now + config.token_lifetime_secs as i64,
    };

    let key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
    jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &key)
        .map_err(|e| AuthError::Crypto(format!("token encode: {e}")))
}

/// Decode and verify a session token (signature, shape, expiry).
pub fn decode_session_token(token: &str, config: &AuthConfig) -> Result<SessionClaims, AuthError> {
    let key = DecodingKey::from_secret(config.jwt_secret.as_bytes());
    let validation = Validation::new(Algorithm::HS256);

    jsonwebtoken::decode::<SessionClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::TokenInvalid(e.to_string()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn test_user(role: Role) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            full_name: "Alice Example".into(),
            email: "alice@example.com".into(),
            password_hash: "$2b$04$irrelevant".into(),
            role,
            nfc_tag_id: None,
            school_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn token_roundtrip() {
        let config = AuthConfig::for_tests("secret-a");
        let user = test_user(Role::Student);

        let token = issue_session_token(&user, &config).unwrap();
        let claims = decode_session_token(&token, &config).unwrap();

        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.role, Role::Student);
        assert_eq!(claims.exp - claims.iat, config.token_lifetime_secs as i64);
    }

    #[test]
    fn wrong_secret_fails() {
        let user = test_user(Role::Admin);
        let token = issue_session_token(&user, &AuthConfig::for_tests("secret-a")).unwrap();

        let err = decode_session_token(&token, &AuthConfig::for_tests("secret-b")).unwrap_err();
        assert!(matches!(err, AuthError::TokenInvalid(_)));
    }

    #[test]
    fn tampered_token_fails() {
        let config = AuthConfig::for_tests("secret-a");
        let user = test_user(Role::Admin);
        let token = issue_session_token(&user, &config).unwrap();

        let tampered = format!("{token}x");
        assert!(decode_session_token(&tampered, &config).is_err());
    }

    #[test]
    fn garbage_token_fails() {
        let config = AuthConfig::for_tests("secret-a");
        let err = decode_session_token("not.a.token", &config).unwrap_err();
        assert!(matches!(err, AuthError::TokenInvalid(_)));
    }

    #[test]
    fn expired_token_fails_with_expiry_error() {
        let config = AuthConfig::for_tests("secret-a");
        let issued = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap().timestamp();
        let claims = SessionClaims {
            sub: Uuid::new_v4().to_string(),
            email: "alice@example.com".into(),
            role: Role::Student,
            iat: issued,
            exp: issued + 60,
        };
        let key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let token =
            jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &key).unwrap();

        let err = decode_session_token(&token, &config).unwrap_err();
        assert!(matches!(err, AuthError::TokenExpired));
    }
}
