//! Upload metadata model.
//!
//! Rows point at objects in the S3-compatible bucket; the bytes never pass
//! through this service.

use pitwall_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `uploads` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Upload {
    pub id: DbId,
    pub entity_type: String,
    pub entity_id: DbId,
    pub vehicle_id: Option<DbId>,
    pub event_id: Option<DbId>,
    pub file_name: String,
    pub file_key: String,
    pub file_url: String,
    pub mime_type: String,
    pub category: String,
    pub size_bytes: Option<i64>,
    pub uploaded_by_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting upload metadata after a confirmed upload.
#[derive(Debug, Clone)]
pub struct CreateUpload {
    pub entity_type: String,
    pub entity_id: DbId,
    pub vehicle_id: Option<DbId>,
    pub event_id: Option<DbId>,
    pub file_name: String,
    pub file_key: String,
    pub file_url: String,
    pub mime_type: String,
    pub category: String,
    pub size_bytes: Option<i64>,
    pub uploaded_by_id: DbId,
}

/// Query string of `GET /api/uploads`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadFilter {
    pub entity_type: Option<String>,
    pub entity_id: Option<DbId>,
    pub category: Option<String>,
}
