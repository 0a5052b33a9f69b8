//! SurrealDB connection management.
//!
//! Uses the `any` engine so the same code path serves a remote
//! `ws://` endpoint in production and an in-memory instance in tests.

use std::env;

use surrealdb::Surreal;
use surrealdb::engine::any::{self, Any};
use surrealdb::opt::auth::Root;
use tracing::info;

/// Handle type used throughout the server.
pub type Db = Surreal<Any>;

/// Configuration for connecting to SurrealDB.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Endpoint (e.g. `ws://127.0.0.1:8000`, or `memory`).
    pub url: String,
    /// SurrealDB namespace.
    pub namespace: String,
    /// SurrealDB database name.
    pub database: String,
    /// Root username, if the endpoint requires authentication.
    pub username: Option<String>,
    /// Root password, if the endpoint requires authentication.
    pub password: Option<String>,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: "memory".into(),
            namespace: "kantin".into(),
            database: "main".into(),
            username: None,
            password: None,
        }
    }
}

impl DbConfig {
    /// Load connection settings from the environment, falling back to
    /// an in-memory instance.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            url: env::var("KANTIN_DB_URL").unwrap_or(defaults.url),
            namespace: env::var("KANTIN_DB_NAMESPACE").unwrap_or(defaults.namespace),
            database: env::var("KANTIN_DB_NAME").unwrap_or(defaults.database),
            username: env::var("KANTIN_DB_USERNAME").ok(),
            password: env::var("KANTIN_DB_PASSWORD").ok(),
        }
    }
}

/// Manages a connection to SurrealDB.
#[derive(Clone)]
pub struct DbManager {
    db: Db,
}

impl DbManager {
    /// Connect using the provided configuration.
    ///
    /// Signs in as root when credentials are configured, selects the
    /// namespace and database, and returns a ready-to-use manager.
    pub async fn connect(config: &DbConfig) -> Result<Self, surrealdb::Error> {
        info!(
            url = %config.url,
            namespace = %config.namespace,
            database = %config.database,
            "Connecting to SurrealDB"
        );

        let db = any::connect(config.url.clone()).await?;

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            db.signin(Root { username, password }).await?;
        }

        db.use_ns(&config.namespace)
            .use_db(&config.database)
            .await?;

        info!("Successfully connected to SurrealDB");

        Ok(Self { db })
    }

    /// Returns a reference to the underlying SurrealDB client.
    pub fn client(&self) -> &Db {
        &self.db
    }
}
