//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Lookups return
//! [`KantinError::NotFound`](crate::error::KantinError::NotFound) for a
//! missing record, so callers can tell absence apart from a store
//! failure (`Database`) — the two must surface differently at the HTTP
//! boundary.

use uuid::Uuid;

use crate::error::KantinResult;
use crate::models::{
    school::{CreateSchool, School, UpdateSchool},
    user::{CreateUser, UpdateUser, User},
};

/// Pagination parameters for list queries.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 50,
        }
    }
}

/// A paginated result set.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

pub trait UserRepository: Send + Sync {
    fn create(&self, input: CreateUser) -> impl Future<Output = KantinResult<User>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = KantinResult<User>> + Send;
    fn get_by_email(&self, email: &str) -> impl Future<Output = KantinResult<User>> + Send;
    /// Resolve an attendance device tag to its user.
    fn get_by_nfc_tag(&self, tag: &str) -> impl Future<Output = KantinResult<User>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateUser,
    ) -> impl Future<Output = KantinResult<User>> + Send;
    /// Hard delete. Historical records referencing the user are
    /// orphaned; accepted limitation.
    fn delete(&self, id: Uuid) -> impl Future<Output = KantinResult<()>> + Send;
    fn list(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = KantinResult<PaginatedResult<User>>> + Send;
}

pub trait SchoolRepository: Send + Sync {
    /// Create a school. The implementation issues the API key.
    fn create(&self, input: CreateSchool) -> impl Future<Output = KantinResult<School>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = KantinResult<School>> + Send;
    /// Resolve a device API key to its school.
    fn get_by_api_key(&self, key: &str) -> impl Future<Output = KantinResult<School>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateSchool,
    ) -> impl Future<Output = KantinResult<School>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = KantinResult<()>> + Send;
    fn list(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = KantinResult<PaginatedResult<School>>> + Send;
}
