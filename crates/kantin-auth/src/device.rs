//! Static API-key authentication for attendance reader devices.
//!
//! Machine-to-machine only, mutually exclusive with session
//! authentication on its routes. Deliberately a simpler, non-expiring
//! shared-secret model: the caller is a constrained device, not a human
//! session. No rotation and no rate limiting at this layer.

use kantin_core::error::KantinError;
use kantin_core::models::school::School;
use kantin_core::repository::SchoolRepository;

use crate::error::AuthError;

/// Authenticates device requests from the `x-api-key` header.
#[derive(Clone)]
pub struct DeviceKeyAuthenticator<S: SchoolRepository> {
    schools: S,
}

impl<S: SchoolRepository> DeviceKeyAuthenticator<S> {
    pub fn new(schools: S) -> Self {
        Self { schools }
    }

    /// Resolve an API-key header value to its school.
    pub async fn authenticate(&self, api_key: Option<&str>) -> Result<School, AuthError> {
        let key = match api_key {
            Some(k) if !k.is_empty() => k,
            _ => return Err(AuthError::MissingApiKey),
        };

        self.schools
            .get_by_api_key(key)
            .await
            .map_err(|e| match e {
                KantinError::NotFound { .. } => AuthError::InvalidApiKey,
                other => AuthError::Store(other),
            })
    }
}
