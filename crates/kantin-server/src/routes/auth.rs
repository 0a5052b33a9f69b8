//! Registration, login, and profile routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::Extension;
use kantin_auth::service::{LoginInput, RegisterInput};
use kantin_core::models::user::{Role, User};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::routes::UserView;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub nfc_tag_id: Option<String>,
    pub school_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserView,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: UserView,
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let (user, token) = state
        .auth
        .register(RegisterInput {
            full_name: req.full_name,
            email: req.email,
            password: req.password,
            role: req.role,
            nfc_tag_id: req.nfc_tag_id,
            school_id: req.school_id,
        })
        .await?;

    tracing::info!(user_id = %user.id, role = %user.role, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user.into(),
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let out = state
        .auth
        .login(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    tracing::info!(user_id = %out.user.id, "login succeeded");

    Ok(Json(AuthResponse {
        token: out.token,
        user: out.user.into(),
    }))
}

/// Profile of the authenticated user, read from the live record the
/// session stage attached.
pub async fn me(Extension(user): Extension<User>) -> Json<ProfileResponse> {
    Json(ProfileResponse { user: user.into() })
}
