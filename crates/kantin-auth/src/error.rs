//! Authentication error types.

use kantin_core::error::KantinError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("No token provided")]
    MissingToken,

    #[error("Invalid token")]
    TokenInvalid(String),

    #[error("Invalid token")]
    TokenExpired,

    #[error("User not found")]
    SubjectNotFound,

    #[error("API key required")]
    MissingApiKey,

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("cryptography error: {0}")]
    Crypto(String),

    /// Collaborator (store) failure. Kept separate from the
    /// authentication variants so an unavailable store surfaces as a
    /// 5xx, never as a 401.
    #[error(transparent)]
    Store(KantinError),
}

impl From<AuthError> for KantinError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken
            | AuthError::TokenInvalid(_)
            | AuthError::TokenExpired
            | AuthError::SubjectNotFound
            | AuthError::MissingApiKey
            | AuthError::InvalidApiKey
            | AuthError::InvalidCredentials => KantinError::AuthenticationFailed {
                reason: err.to_string(),
            },
            AuthError::Crypto(msg) => KantinError::Crypto(msg),
            AuthError::Store(inner) => inner,
        }
    }
}
