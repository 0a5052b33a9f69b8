//! Route table.
//!
//! Every protected route is guarded by exactly one of the two
//! authentication stages; the role stage is composed per route group
//! with its permitted set declared here, at composition time.

pub mod attendance;
pub mod auth;
pub mod schools;
pub mod users;

use axum::extract::Request;
use axum::http::{Method, StatusCode, Uri};
use axum::middleware::Next;
use axum::response::{IntoResponse, Json};
use axum::routing::{get, post};
use axum::{Router, middleware};
use kantin_core::models::user::{Role, User};
use serde::Serialize;
use serde_json::json;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::middleware::{require_device_key, require_roles, require_session};
use crate::state::AppState;

/// Roles permitted on the user- and school-management surfaces.
const STAFF_ROLES: &[Role] = &[Role::Admin, Role::SuperAdmin];

const SUPER_ADMIN_ONLY: &[Role] = &[Role::SuperAdmin];

/// User projection returned by the API. Never carries the password
/// hash.
#[derive(Debug, Serialize)]
pub struct UserView {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    pub nfc_tag_id: Option<String>,
    pub school_id: Option<Uuid>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            role: user.role,
            nfc_tag_id: user.nfc_tag_id,
            school_id: user.school_id,
        }
    }
}

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let session = middleware::from_fn_with_state(state.clone(), require_session);

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .merge(
            Router::new()
                .route("/me", get(auth::me))
                .route_layer(session.clone()),
        );

    let user_routes = Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route(
            "/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route_layer(middleware::from_fn(|req: Request, next: Next| {
            require_roles(req, next, STAFF_ROLES)
        }))
        .merge(
            Router::new()
                .route("/superadmin", post(users::create_super_admin))
                .route_layer(middleware::from_fn(|req: Request, next: Next| {
                    require_roles(req, next, SUPER_ADMIN_ONLY)
                })),
        )
        .route_layer(session.clone());

    let school_routes = Router::new()
        .route("/", get(schools::list_schools).post(schools::create_school))
        .route("/{id}", get(schools::get_school))
        .route_layer(middleware::from_fn(|req: Request, next: Next| {
            require_roles(req, next, STAFF_ROLES)
        }))
        .route_layer(session);

    let attendance_routes = Router::new()
        .route("/sync", post(attendance::sync))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_device_key,
        ));

    Router::new()
        .route("/health", get(health))
        .nest("/v1/auth", auth_routes)
        .nest("/v1/users", user_routes)
        .nest("/v1/schools", school_routes)
        .nest("/v1/attendance", attendance_routes)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn not_found(method: Method, uri: Uri) -> impl IntoResponse {
    tracing::warn!(%method, %uri, "route not found");
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Not Found" })))
}
