//! KANTIN Auth — credential hashing, session token
//! issuance/verification, request authentication, and role-based
//! authorization.
//!
//! Every protected operation passes through exactly one of
//! [`SessionAuthenticator`] (human sessions, bearer token) or
//! [`DeviceKeyAuthenticator`] (attendance readers, static API key),
//! optionally followed by the role checks in [`authorize`].

pub mod authorize;
pub mod config;
pub mod device;
pub mod error;
pub mod password;
pub mod service;
pub mod session;
pub mod token;

pub use authorize::AccessDecision;
pub use config::{AuthConfig, ConfigError};
pub use device::DeviceKeyAuthenticator;
pub use error::AuthError;
pub use service::{AuthService, LoginInput, LoginOutput, RegisterInput};
pub use session::SessionAuthenticator;
pub use token::SessionClaims;
