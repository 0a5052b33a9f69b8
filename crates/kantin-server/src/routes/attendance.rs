//! Device attendance ingestion.
//!
//! The route exists to give the device-key authentication stage its
//! consumer: the handler validates the payload shape and acknowledges
//! receipt against the authenticated school. Attendance matching and
//! persistence are handled elsewhere and are out of scope here.

use axum::Extension;
use axum::http::StatusCode;
use axum::response::Json;
use chrono::{DateTime, Utc};
use kantin_core::error::KantinError;
use kantin_core::models::school::School;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct DeviceLog {
    pub nfc_tag_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct SyncRequest {
    pub logs: Vec<DeviceLog>,
}

#[derive(Debug, Serialize)]
pub struct SyncResponse {
    pub message: String,
    pub count: usize,
    pub school_id: Uuid,
}

pub async fn sync(
    Extension(school): Extension<School>,
    Json(req): Json<SyncRequest>,
) -> Result<(StatusCode, Json<SyncResponse>), ApiError> {
    if req.logs.is_empty() {
        return Err(KantinError::Validation {
            message: "no attendance logs provided".into(),
        }
        .into());
    }

    tracing::info!(
        school_id = %school.id,
        count = req.logs.len(),
        "attendance sync received"
    );

    Ok((
        StatusCode::ACCEPTED,
        Json(SyncResponse {
            message: "Attendance sync accepted".into(),
            count: req.logs.len(),
            school_id: school.id,
        }),
    ))
}
