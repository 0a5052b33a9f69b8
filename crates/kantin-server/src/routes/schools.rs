//! School management routes.
//!
//! Creation issues the device API key; these routes are the only
//! place the key is ever returned, and they sit behind the staff role
//! check.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use kantin_core::models::school::{CreateSchool, School};
use kantin_core::repository::{Pagination, SchoolRepository};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::routes::users::ListQuery;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateSchoolRequest {
    pub name: String,
    pub address: String,
}

#[derive(Debug, Serialize)]
pub struct SchoolView {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub api_key: String,
}

impl From<School> for SchoolView {
    fn from(school: School) -> Self {
        Self {
            id: school.id,
            name: school.name,
            address: school.address,
            api_key: school.api_key,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SchoolResponse {
    pub school: SchoolView,
}

#[derive(Debug, Serialize)]
pub struct SchoolListResponse {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub schools: Vec<SchoolView>,
}

pub async fn create_school(
    State(state): State<AppState>,
    Json(req): Json<CreateSchoolRequest>,
) -> Result<(StatusCode, Json<SchoolResponse>), ApiError> {
    let school = state
        .schools
        .create(CreateSchool {
            name: req.name,
            address: req.address,
        })
        .await?;

    tracing::info!(school_id = %school.id, "school created");

    Ok((
        StatusCode::CREATED,
        Json(SchoolResponse {
            school: school.into(),
        }),
    ))
}

pub async fn get_school(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SchoolResponse>, ApiError> {
    let school = state.schools.get_by_id(id).await?;
    Ok(Json(SchoolResponse {
        school: school.into(),
    }))
}

pub async fn list_schools(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<SchoolListResponse>, ApiError> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(10).clamp(1, 100);

    let result = state
        .schools
        .list(Pagination {
            offset: (page - 1) * limit,
            limit,
        })
        .await?;

    Ok(Json(SchoolListResponse {
        total: result.total,
        page,
        limit,
        schools: result.items.into_iter().map(SchoolView::from).collect(),
    }))
}
