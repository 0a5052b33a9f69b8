//! Authentication service — registration and login orchestration.
//!
//! Generic over the repository trait so this crate has no dependency
//! on the database crate.

use kantin_core::error::{KantinError, KantinResult};
use kantin_core::models::user::{CreateUser, Role, User};
use kantin_core::repository::UserRepository;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;
use crate::token;

/// Input for the registration flow.
#[derive(Debug)]
pub struct RegisterInput {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub nfc_tag_id: Option<String>,
    pub school_id: Option<Uuid>,
}

/// Input for the login flow.
#[derive(Debug)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Successful login result.
#[derive(Debug)]
pub struct LoginOutput {
    /// Signed session token.
    pub token: String,
    /// The authenticated user record.
    pub user: User,
}

pub struct AuthService<U: UserRepository> {
    users: U,
    config: AuthConfig,
}

impl<U: UserRepository> AuthService<U> {
    pub fn new(users: U, config: AuthConfig) -> Self {
        Self { users, config }
    }

    /// Register a new account and issue its first session token.
    ///
    /// This surface can never create a SUPER_ADMIN; that requires an
    /// already-authenticated SUPER_ADMIN through the user-management
    /// API.
    pub async fn register(&self, input: RegisterInput) -> KantinResult<(User, String)> {
        if input.role == Role::SuperAdmin {
            return Err(KantinError::AuthorizationDenied {
                reason: "SUPER_ADMIN accounts cannot be self-registered".into(),
            });
        }

        let user = self.create_account(input).await?;
        let token = token::issue_session_token(&user, &self.config).map_err(KantinError::from)?;

        Ok((user, token))
    }

    /// Validate, hash, and persist a new account without issuing a
    /// token. Used by `register` and by the authenticated
    /// user-management surface (which enforces its own role rules).
    pub async fn create_account(&self, input: RegisterInput) -> KantinResult<User> {
        validate_email(&input.email)?;
        if input.password.len() < self.config.min_password_length {
            return Err(KantinError::Validation {
                message: format!(
                    "password must be at least {} characters",
                    self.config.min_password_length
                ),
            });
        }

        // Reject duplicates up front; only a true not-found proceeds.
        match self.users.get_by_email(&input.email).await {
            Ok(_) => {
                return Err(KantinError::AlreadyExists {
                    entity: "user".into(),
                });
            }
            Err(KantinError::NotFound { .. }) => {}
            Err(e) => return Err(e),
        }

        let password_hash = password::hash_password(&input.password, self.config.bcrypt_cost)
            .map_err(KantinError::from)?;

        self.users
            .create(CreateUser {
                full_name: input.full_name,
                email: input.email,
                password_hash,
                role: input.role,
                nfc_tag_id: input.nfc_tag_id,
                school_id: input.school_id,
            })
            .await
    }

    /// Authenticate with email + password and issue a session token.
    ///
    /// Unknown email and wrong password collapse into one
    /// `InvalidCredentials` rejection so the API does not reveal which
    /// accounts exist. Store failures are not part of that collapse.
    pub async fn login(&self, input: LoginInput) -> KantinResult<LoginOutput> {
        let user = match self.users.get_by_email(&input.email).await {
            Ok(u) => u,
            Err(KantinError::NotFound { .. }) => {
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(e) => return Err(e),
        };

        if !password::verify_password(&input.password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = token::issue_session_token(&user, &self.config).map_err(KantinError::from)?;

        Ok(LoginOutput { token, user })
    }
}

fn validate_email(email: &str) -> KantinResult<()> {
    let well_formed = email.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
    });
    if well_formed {
        Ok(())
    } else {
        Err(KantinError::Validation {
            message: "email is invalid".into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_validation() {
        assert!(validate_email("alice@example.com").is_ok());
        assert!(validate_email("a@b.co").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("alice@nodot").is_err());
        assert!(validate_email("alice@.com").is_err());
    }
}
