//! SurrealDB implementation of [`SchoolRepository`].
//!
//! The device API key is issued here at creation time (random UUID v4)
//! and never updated afterwards — rotation is out of scope.

use kantin_core::error::KantinResult;
use kantin_core::models::school::{CreateSchool, School, UpdateSchool};
use kantin_core::repository::{PaginatedResult, Pagination, SchoolRepository};
use serde::Deserialize;
use surrealdb::sql::Datetime;
use surrealdb::{Connection, Surreal};
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, Deserialize)]
struct SchoolRow {
    name: String,
    address: String,
    api_key: String,
    created_at: Datetime,
    updated_at: Datetime,
}

impl SchoolRow {
    fn into_school(self, id: Uuid) -> School {
        School {
            id,
            name: self.name,
            address: self.address,
            api_key: self.api_key,
            created_at: self.created_at.0,
            updated_at: self.updated_at.0,
        }
    }
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, Deserialize)]
struct SchoolRowWithId {
    record_id: String,
    name: String,
    address: String,
    api_key: String,
    created_at: Datetime,
    updated_at: Datetime,
}

impl SchoolRowWithId {
    fn try_into_school(self) -> Result<School, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Corrupt(format!("invalid UUID: {e}")))?;
        Ok(School {
            id,
            name: self.name,
            address: self.address,
            api_key: self.api_key,
            created_at: self.created_at.0,
            updated_at: self.updated_at.0,
        })
    }
}

/// Row struct for count queries.
#[derive(Debug, Deserialize)]
struct CountRow {
    total: u64,
}

/// SurrealDB implementation of the School repository.
pub struct SurrealSchoolRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> Clone for SurrealSchoolRepository<C> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
        }
    }
}

impl<C: Connection> SurrealSchoolRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> SchoolRepository for SurrealSchoolRepository<C> {
    async fn create(&self, input: CreateSchool) -> KantinResult<School> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let api_key = Uuid::new_v4().to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('school', $id) SET \
                 name = $name, \
                 address = $address, \
                 api_key = $api_key",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("address", input.address))
            .bind(("api_key", api_key))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<SchoolRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "school".into(),
            id: id_str,
        })?;

        Ok(row.into_school(id))
    }

    async fn get_by_id(&self, id: Uuid) -> KantinResult<School> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("SELECT * FROM type::record('school', $id)")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SchoolRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "school".into(),
            id: id_str,
        })?;

        Ok(row.into_school(id))
    }

    async fn get_by_api_key(&self, key: &str) -> KantinResult<School> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM school \
                 WHERE api_key = $api_key",
            )
            .bind(("api_key", key.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SchoolRowWithId> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "school".into(),
            id: "api_key=<redacted>".into(),
        })?;

        Ok(row.try_into_school()?)
    }

    async fn update(&self, id: Uuid, input: UpdateSchool) -> KantinResult<School> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.name.is_some() {
            sets.push("name = $name");
        }
        if input.address.is_some() {
            sets.push("address = $address");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('school', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(query).bind(("id", id_str.clone()));

        if let Some(name) = input.name {
            builder = builder.bind(("name", name));
        }
        if let Some(address) = input.address {
            builder = builder.bind(("address", address));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<SchoolRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "school".into(),
            id: id_str,
        })?;

        Ok(row.into_school(id))
    }

    async fn delete(&self, id: Uuid) -> KantinResult<()> {
        self.db
            .query("DELETE type::record('school', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }

    async fn list(&self, pagination: Pagination) -> KantinResult<PaginatedResult<School>> {
        let mut count_result = self
            .db
            .query("SELECT count() AS total FROM school GROUP ALL")
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM school \
                 ORDER BY created_at ASC \
                 LIMIT $limit START $offset",
            )
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SchoolRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_school())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }
}
