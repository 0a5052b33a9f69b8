//! SurrealDB implementation of [`UserRepository`].

use kantin_core::error::{KantinError, KantinResult};
use kantin_core::models::user::{CreateUser, Role, UpdateUser, User};
use kantin_core::repository::{PaginatedResult, Pagination, UserRepository};
use serde::Deserialize;
use surrealdb::sql::Datetime;
use surrealdb::{Connection, Surreal};
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, Deserialize)]
struct UserRow {
    full_name: String,
    email: String,
    password_hash: String,
    role: String,
    nfc_tag_id: Option<String>,
    school_id: Option<String>,
    created_at: Datetime,
    updated_at: Datetime,
}

impl UserRow {
    fn into_user(self, id: Uuid) -> Result<User, DbError> {
        let role: Role = self
            .role
            .parse()
            .map_err(|_| DbError::Corrupt(format!("unknown role: {}", self.role)))?;
        let school_id = self
            .school_id
            .map(|s| Uuid::parse_str(&s))
            .transpose()
            .map_err(|e| DbError::Corrupt(format!("invalid school UUID: {e}")))?;
        Ok(User {
            id,
            full_name: self.full_name,
            email: self.email,
            password_hash: self.password_hash,
            role,
            nfc_tag_id: self.nfc_tag_id,
            school_id,
            created_at: self.created_at.0,
            updated_at: self.updated_at.0,
        })
    }
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, Deserialize)]
struct UserRowWithId {
    record_id: String,
    full_name: String,
    email: String,
    password_hash: String,
    role: String,
    nfc_tag_id: Option<String>,
    school_id: Option<String>,
    created_at: Datetime,
    updated_at: Datetime,
}

impl UserRowWithId {
    fn try_into_user(self) -> Result<User, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Corrupt(format!("invalid UUID: {e}")))?;
        let row = UserRow {
            full_name: self.full_name,
            email: self.email,
            password_hash: self.password_hash,
            role: self.role,
            nfc_tag_id: self.nfc_tag_id,
            school_id: self.school_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        };
        row.into_user(id)
    }
}

/// Row struct for count queries.
#[derive(Debug, Deserialize)]
struct CountRow {
    total: u64,
}

/// SurrealDB implementation of the User repository.
pub struct SurrealUserRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> Clone for SurrealUserRepository<C> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
        }
    }
}

impl<C: Connection> SurrealUserRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    /// Reject a device tag already bound to a different user.
    async fn assert_tag_unused(&self, tag: &str, exclude: Option<Uuid>) -> KantinResult<()> {
        match self.get_by_nfc_tag(tag).await {
            Ok(existing) if Some(existing.id) != exclude => Err(KantinError::AlreadyExists {
                entity: "nfc_tag_id".into(),
            }),
            Ok(_) => Ok(()),
            Err(KantinError::NotFound { .. }) => Ok(()),
            Err(e) => Err(e),
        }
    }
}

impl<C: Connection> UserRepository for SurrealUserRepository<C> {
    async fn create(&self, input: CreateUser) -> KantinResult<User> {
        if let Some(tag) = &input.nfc_tag_id {
            self.assert_tag_unused(tag, None).await?;
        }

        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('user', $id) SET \
                 full_name = $full_name, \
                 email = $email, \
                 password_hash = $password_hash, \
                 role = $role, \
                 nfc_tag_id = $nfc_tag_id, \
                 school_id = $school_id",
            )
            .bind(("id", id_str.clone()))
            .bind(("full_name", input.full_name))
            .bind(("email", input.email))
            .bind(("password_hash", input.password_hash))
            .bind(("role", input.role.as_str()))
            .bind(("nfc_tag_id", input.nfc_tag_id))
            .bind(("school_id", input.school_id.map(|s| s.to_string())))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "user".into(),
            id: id_str,
        })?;

        Ok(row.into_user(id)?)
    }

    async fn get_by_id(&self, id: Uuid) -> KantinResult<User> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('user', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "user".into(),
            id: id_str,
        })?;

        Ok(row.into_user(id)?)
    }

    async fn get_by_email(&self, email: &str) -> KantinResult<User> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM user \
                 WHERE email = $email",
            )
            .bind(("email", email.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "user".into(),
            id: format!("email={email}"),
        })?;

        Ok(row.try_into_user()?)
    }

    async fn get_by_nfc_tag(&self, tag: &str) -> KantinResult<User> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM user \
                 WHERE nfc_tag_id = $tag",
            )
            .bind(("tag", tag.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "user".into(),
            id: format!("nfc_tag_id={tag}"),
        })?;

        Ok(row.try_into_user()?)
    }

    async fn update(&self, id: Uuid, input: UpdateUser) -> KantinResult<User> {
        if let Some(Some(tag)) = &input.nfc_tag_id {
            self.assert_tag_unused(tag, Some(id)).await?;
        }

        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.full_name.is_some() {
            sets.push("full_name = $full_name");
        }
        if input.email.is_some() {
            sets.push("email = $email");
        }
        if input.password_hash.is_some() {
            sets.push("password_hash = $password_hash");
        }
        if input.role.is_some() {
            sets.push("role = $role");
        }
        if input.nfc_tag_id.is_some() {
            sets.push("nfc_tag_id = $nfc_tag_id");
        }
        if input.school_id.is_some() {
            sets.push("school_id = $school_id");
        }
        sets.push("updated_at = time::now()");

        let query = format!("UPDATE type::record('user', $id) SET {}", sets.join(", "));

        let mut builder = self.db.query(query).bind(("id", id_str.clone()));

        if let Some(full_name) = input.full_name {
            builder = builder.bind(("full_name", full_name));
        }
        if let Some(email) = input.email {
            builder = builder.bind(("email", email));
        }
        if let Some(password_hash) = input.password_hash {
            builder = builder.bind(("password_hash", password_hash));
        }
        if let Some(role) = input.role {
            builder = builder.bind(("role", role.as_str()));
        }
        if let Some(nfc_tag_id) = input.nfc_tag_id {
            // Option<Option<String>>: Some(Some(v)) = set, Some(None) = clear.
            builder = builder.bind(("nfc_tag_id", nfc_tag_id));
        }
        if let Some(school_id) = input.school_id {
            builder = builder.bind(("school_id", school_id.to_string()));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "user".into(),
            id: id_str,
        })?;

        Ok(row.into_user(id)?)
    }

    async fn delete(&self, id: Uuid) -> KantinResult<()> {
        self.db
            .query("DELETE type::record('user', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn list(&self, pagination: Pagination) -> KantinResult<PaginatedResult<User>> {
        let mut count_result = self
            .db
            .query("SELECT count() AS total FROM user GROUP ALL")
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM user \
                 ORDER BY created_at ASC \
                 LIMIT $limit START $offset",
            )
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_user())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }
}
