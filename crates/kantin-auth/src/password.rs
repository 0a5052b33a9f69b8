//! Credential hashing and verification using bcrypt.

use crate::error::AuthError;

/// Hash a plaintext password with bcrypt at the given cost factor.
///
/// A fresh random salt is generated per call, so hashing the same
/// password twice yields two different encoded hashes — both of which
/// verify against the password.
pub fn hash_password(password: &str, cost: u32) -> Result<String, AuthError> {
    bcrypt::hash(password, cost).map_err(|e| AuthError::Crypto(format!("bcrypt hash: {e}")))
}

/// Verify a plaintext password against a stored bcrypt hash.
///
/// Fails closed: a malformed stored hash yields `false`, never an
/// error the caller could mistake for anything else. The plaintext is
/// never logged or returned.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    bcrypt::verify(password, stored_hash).unwrap_or(false)
}
