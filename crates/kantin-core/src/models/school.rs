//! School domain model.
//!
//! Schools are the tenants of the system: each owns an API key used by
//! its attendance reader devices and a set of users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct School {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    /// Shared secret for device ingestion. Unique, issued at creation,
    /// immutable afterwards (rotation is out of scope).
    pub api_key: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSchool {
    pub name: String,
    pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateSchool {
    pub name: Option<String>,
    pub address: Option<String>,
}
