//! User domain model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::KantinError;

/// Actor role, fixed at a closed set.
///
/// Stored and transmitted as a SCREAMING_SNAKE_CASE string
/// (`SUPER_ADMIN`, `HEALTH_OFFICE`, ...). Adding a variant is a
/// compile-checked change everywhere roles are matched.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SuperAdmin,
    Admin,
    Student,
    School,
    Caterer,
    HealthOffice,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "SUPER_ADMIN",
            Role::Admin => "ADMIN",
            Role::Student => "STUDENT",
            Role::School => "SCHOOL",
            Role::Caterer => "CATERER",
            Role::HealthOffice => "HEALTH_OFFICE",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = KantinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUPER_ADMIN" => Ok(Role::SuperAdmin),
            "ADMIN" => Ok(Role::Admin),
            "STUDENT" => Ok(Role::Student),
            "SCHOOL" => Ok(Role::School),
            "CATERER" => Ok(Role::Caterer),
            "HEALTH_OFFICE" => Ok(Role::HealthOffice),
            other => Err(KantinError::Validation {
                message: format!("unknown role: {other}"),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    /// NFC tag bound to this user for attendance capture, if any.
    /// Unique across all users when present.
    pub nfc_tag_id: Option<String>,
    /// The school this user belongs to, if any.
    pub school_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub full_name: String,
    pub email: String,
    /// Pre-computed credential hash; hashing the raw password is the
    /// auth layer's concern, performed before this struct is built.
    pub password_hash: String,
    pub role: Role,
    pub nfc_tag_id: Option<String>,
    pub school_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateUser {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<Role>,
    /// `Some(Some(val))` = set, `Some(None)` = clear, `None` = no change.
    pub nfc_tag_id: Option<Option<String>>,
    pub school_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_string_roundtrip() {
        for role in [
            Role::SuperAdmin,
            Role::Admin,
            Role::Student,
            Role::School,
            Role::Caterer,
            Role::HealthOffice,
        ] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn role_serde_matches_display() {
        let json = serde_json::to_string(&Role::HealthOffice).unwrap();
        assert_eq!(json, "\"HEALTH_OFFICE\"");
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!("JANITOR".parse::<Role>().is_err());
    }
}
