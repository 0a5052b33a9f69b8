//! KANTIN Server — application entry point.

use anyhow::Context;
use kantin_auth::config::{AuthConfig, ConfigError};
use kantin_db::{DbConfig, DbManager};
use kantin_server::config::ServerConfig;
use kantin_server::routes;
use kantin_server::state::AppState;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("kantin=info".parse()?))
        .json()
        .init();

    let settings = ServerConfig::from_env();

    // A missing signing secret is fatal in production; outside of it
    // the clearly marked development fallback is permitted.
    let auth_config = match AuthConfig::from_env() {
        Ok(config) => config,
        Err(ConfigError::MissingJwtSecret) if !settings.production => {
            tracing::warn!("JWT_SECRET not set; using the development fallback secret");
            AuthConfig::for_development()
        }
        Err(e) => return Err(e).context("loading authentication configuration"),
    };

    let db_config = DbConfig::from_env();
    let manager = DbManager::connect(&db_config)
        .await
        .context("connecting to SurrealDB")?;
    kantin_db::run_migrations(manager.client())
        .await
        .context("running migrations")?;

    let state = AppState::new(manager.client().clone(), auth_config);

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr)
        .await
        .with_context(|| format!("binding {}", settings.bind_addr))?;
    tracing::info!(addr = %settings.bind_addr, "KANTIN server listening");

    axum::serve(listener, routes::app(state)).await?;

    Ok(())
}
