//! Shared application state.

use std::sync::Arc;

use kantin_auth::config::AuthConfig;
use kantin_auth::device::DeviceKeyAuthenticator;
use kantin_auth::service::AuthService;
use kantin_auth::session::SessionAuthenticator;
use kantin_db::Db;
use kantin_db::repository::{SurrealSchoolRepository, SurrealUserRepository};
use surrealdb::engine::any::Any;

pub type UserRepo = SurrealUserRepository<Any>;
pub type SchoolRepo = SurrealSchoolRepository<Any>;

/// Everything a request handler needs, cloned cheaply per request.
/// All contents are read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub users: UserRepo,
    pub schools: SchoolRepo,
    pub sessions: Arc<SessionAuthenticator<UserRepo>>,
    pub devices: Arc<DeviceKeyAuthenticator<SchoolRepo>>,
    pub auth: Arc<AuthService<UserRepo>>,
    pub config: AuthConfig,
}

impl AppState {
    pub fn new(db: Db, config: AuthConfig) -> Self {
        let users = SurrealUserRepository::new(db.clone());
        let schools = SurrealSchoolRepository::new(db);

        Self {
            sessions: Arc::new(SessionAuthenticator::new(users.clone(), config.clone())),
            devices: Arc::new(DeviceKeyAuthenticator::new(schools.clone())),
            auth: Arc::new(AuthService::new(users.clone(), config.clone())),
            users,
            schools,
            config,
        }
    }
}
