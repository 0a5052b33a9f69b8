//! Bearer-token session authentication.
//!
//! Per-request state machine: no token → token present → token valid →
//! identity resolved, with a rejection exit at every boundary. On
//! success the caller gets the *live* user record, not the token's
//! claims — a role change is effective on the very next request even
//! though outstanding tokens still carry the old role.

use kantin_core::error::KantinError;
use kantin_core::models::user::User;
use kantin_core::repository::UserRepository;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::token;

/// Extract the credential from a bearer-scheme authorization header
/// value.
fn bearer_token(header: &str) -> Option<&str> {
    header.strip_prefix("Bearer ")
}

/// Authenticates human sessions from the `Authorization` header.
///
/// Stateless per call; the only shared state is the read-only signing
/// secret inside the config. Performs exactly one store read per
/// successful or subject-not-found request, and none before the token
/// is verified.
#[derive(Clone)]
pub struct SessionAuthenticator<U: UserRepository> {
    users: U,
    config: AuthConfig,
}

impl<U: UserRepository> SessionAuthenticator<U> {
    pub fn new(users: U, config: AuthConfig) -> Self {
        Self { users, config }
    }

    /// Run the full authentication chain against an authorization
    /// header value.
    pub async fn authenticate(&self, authorization: Option<&str>) -> Result<User, AuthError> {
        // 1. A bearer credential must be present.
        let token = authorization
            .and_then(bearer_token)
            .ok_or(AuthError::MissingToken)?;

        // 2. Verify signature, shape, and expiry. No store access yet.
        let claims = token::decode_session_token(token, &self.config)?;

        let subject_id = Uuid::parse_str(&claims.sub)
            .map_err(|e| AuthError::TokenInvalid(format!("bad subject id: {e}")))?;

        // 3. Resolve the subject against the live user store. A missing
        //    user is an authentication failure; a store failure is not.
        let user = self
            .users
            .get_by_id(subject_id)
            .await
            .map_err(|e| match e {
                KantinError::NotFound { .. } => AuthError::SubjectNotFound,
                other => AuthError::Store(other),
            })?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_extraction() {
        assert_eq!(bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(bearer_token("bearer abc"), None);
        assert_eq!(bearer_token("Basic dXNlcg=="), None);
        assert_eq!(bearer_token(""), None);
    }
}
