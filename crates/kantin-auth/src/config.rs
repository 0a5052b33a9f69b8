//! Authentication configuration.
//!
//! Constructed once at process start and passed by reference into the
//! token codec and credential verifier. Nothing in this crate reads the
//! environment at request time.

use std::env;

use thiserror::Error;

/// Session token lifetime: 24 hours.
const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 86_400;

/// bcrypt cost factor (2^cost rounds).
const DEFAULT_BCRYPT_COST: u32 = 10;

const DEFAULT_MIN_PASSWORD_LENGTH: usize = 8;

/// Fallback signing secret for development setups only. The server
/// refuses to fall back to this value when running in production.
const DEV_JWT_SECRET: &str = "kantin-dev-secret-do-not-use-in-production";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JWT_SECRET is not set")]
    MissingJwtSecret,

    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

/// Configuration for the authentication layer.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Symmetric HS256 signing secret for session tokens.
    pub jwt_secret: String,
    /// Session token lifetime in seconds (default: 86_400 = 24 hours).
    pub token_lifetime_secs: u64,
    /// bcrypt cost factor for credential hashing (default: 10).
    pub bcrypt_cost: u32,
    /// Minimum password length accepted at registration (default: 8).
    pub min_password_length: usize,
}

impl AuthConfig {
    /// Load configuration from the environment.
    ///
    /// `JWT_SECRET` is required; absence is a fatal startup error, not
    /// a runtime fallback. `TOKEN_LIFETIME_SECS` and `BCRYPT_COST` are
    /// optional overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = env::var("JWT_SECRET").map_err(|_| ConfigError::MissingJwtSecret)?;

        let token_lifetime_secs = parse_env("TOKEN_LIFETIME_SECS", DEFAULT_TOKEN_LIFETIME_SECS)?;
        let bcrypt_cost = parse_env("BCRYPT_COST", DEFAULT_BCRYPT_COST)?;

        Ok(Self {
            jwt_secret,
            token_lifetime_secs,
            bcrypt_cost,
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
        })
    }

    /// Development-only configuration with a well-known fallback
    /// secret. Must never be used in production; callers gate this on
    /// the deployment environment.
    pub fn for_development() -> Self {
        Self {
            jwt_secret: DEV_JWT_SECRET.into(),
            token_lifetime_secs: DEFAULT_TOKEN_LIFETIME_SECS,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
        }
    }

    /// Configuration for tests: distinct secret per test, minimal
    /// bcrypt cost so suites stay fast.
    pub fn for_tests(secret: &str) -> Self {
        Self {
            jwt_secret: secret.into(),
            token_lifetime_secs: DEFAULT_TOKEN_LIFETIME_SECS,
            bcrypt_cost: 4,
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
        }
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
            name: name.into(),
            value: raw,
        }),
        Err(_) => Ok(default),
    }
}
