//! Server process configuration.

use std::env;

/// Settings read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address to bind (default `0.0.0.0:3000`).
    pub bind_addr: String,
    /// True when `APP_ENV=production`. Controls whether the
    /// development JWT fallback secret is permitted.
    pub production: bool,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: env::var("KANTIN_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into()),
            production: env::var("APP_ENV").is_ok_and(|v| v == "production"),
        }
    }
}
