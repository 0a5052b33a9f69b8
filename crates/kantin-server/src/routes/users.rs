//! User management routes.
//!
//! All routes here sit behind session authentication plus the staff
//! role check. Mutations of a SUPER_ADMIN record additionally pass the
//! privilege-escalation guard against the target's role.

use axum::Extension;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use kantin_auth::authorize::{AccessDecision, authorize_account_mutation};
use kantin_auth::password;
use kantin_auth::service::RegisterInput;
use kantin_core::error::KantinError;
use kantin_core::models::user::{Role, UpdateUser, User};
use kantin_core::repository::{Pagination, UserRepository};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::routes::UserView;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub users: Vec<UserView>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: UserView,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub nfc_tag_id: Option<String>,
    pub school_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct CreateSuperAdminRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
    pub nfc_tag_id: Option<String>,
    pub school_id: Option<Uuid>,
}

pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<UserListResponse>, ApiError> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(10).clamp(1, 100);

    let result = state
        .users
        .list(Pagination {
            offset: (page - 1) * limit,
            limit,
        })
        .await?;

    Ok(Json(UserListResponse {
        total: result.total,
        page,
        limit,
        users: result.items.into_iter().map(UserView::from).collect(),
    }))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.users.get_by_id(id).await?;
    Ok(Json(UserResponse { user: user.into() }))
}

/// Create a user on behalf of staff. SUPER_ADMIN accounts are not
/// creatable here regardless of the actor; that is the dedicated
/// route's job.
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    if req.role == Role::SuperAdmin {
        return Err(ApiError::forbidden(
            "only the SUPER_ADMIN route may create SUPER_ADMIN accounts",
        ));
    }

    let user = state
        .auth
        .create_account(RegisterInput {
            full_name: req.full_name,
            email: req.email,
            password: req.password,
            role: req.role,
            nfc_tag_id: req.nfc_tag_id,
            school_id: req.school_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse { user: user.into() })))
}

pub async fn create_super_admin(
    State(state): State<AppState>,
    Json(req): Json<CreateSuperAdminRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = state
        .auth
        .create_account(RegisterInput {
            full_name: req.full_name,
            email: req.email,
            password: req.password,
            role: Role::SuperAdmin,
            nfc_tag_id: None,
            school_id: None,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse { user: user.into() })))
}

pub async fn update_user(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let target = state.users.get_by_id(id).await?;

    if let AccessDecision::Denied { reason } = authorize_account_mutation(actor.role, target.role)
    {
        return Err(ApiError::forbidden(reason));
    }

    let password_hash = match req.password {
        Some(password) => {
            if password.len() < state.config.min_password_length {
                return Err(KantinError::Validation {
                    message: format!(
                        "password must be at least {} characters",
                        state.config.min_password_length
                    ),
                }
                .into());
            }
            Some(
                password::hash_password(&password, state.config.bcrypt_cost)
                    .map_err(KantinError::from)?,
            )
        }
        None => None,
    };

    let update = UpdateUser {
        full_name: req.full_name,
        email: req.email,
        password_hash,
        // Role changes are a SUPER_ADMIN-only capability; others'
        // requests simply leave the role untouched.
        role: if actor.role == Role::SuperAdmin {
            req.role
        } else {
            None
        },
        nfc_tag_id: req.nfc_tag_id.map(Some),
        school_id: req.school_id,
    };

    let user = state.users.update(id, update).await?;
    Ok(Json(UserResponse { user: user.into() }))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Extension(actor): Extension<User>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let target = state.users.get_by_id(id).await?;

    if let AccessDecision::Denied { reason } = authorize_account_mutation(actor.role, target.role)
    {
        return Err(ApiError::forbidden(reason));
    }

    state.users.delete(id).await?;
    tracing::info!(user_id = %id, actor_id = %actor.id, "user deleted");

    Ok(Json(serde_json::json!({ "message": "User deleted" })))
}
