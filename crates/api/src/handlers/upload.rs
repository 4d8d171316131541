//! Handlers for the `/uploads` resource.
//!
//! File bytes never pass through the API. The client asks for a presigned
//! `PUT` URL, sends the object straight to the bucket, then confirms it so
//! the metadata row is recorded.

use std::time::Duration;

use axum::extract::State;
use pitwall_core::error::CoreError;
use pitwall_core::roles::can_modify;
use pitwall_core::types::DbId;
use pitwall_core::uploads::{
    build_file_key, check_category, check_entity_type, check_key_belongs,
    check_mime_for_category, DOWNLOAD_URL_EXPIRY_SECS, ENTITY_EVENT, ENTITY_VEHICLE,
    MAX_FILE_SIZE_BYTES,
};
use pitwall_core::validation::rule_violation;
use pitwall_db::models::upload::{CreateUpload, Upload, UploadFilter};
use pitwall_db::repositories::{EventRepo, UploadRepo, VehicleRepo};
use pitwall_db::DbPool;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::{AppError, AppResult};
use crate::extract::{ValidPath, ValidQuery, ValidatedJson};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /uploads/presign`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[validate(schema(function = "validate_presign"))]
pub struct PresignRequest {
    pub entity_type: String,
    pub entity_id: DbId,
    #[validate(length(min = 1, message = "fileName is required"))]
    pub file_name: String,
    /// MIME type the client will send with the `PUT`.
    pub file_type: String,
    pub category: String,
}

fn validate_presign(input: &PresignRequest) -> Result<(), ValidationError> {
    check_file_fields(&input.entity_type, &input.category, &input.file_type)
        .map_err(rule_violation)
}

/// Request body for `POST /uploads/confirm`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[validate(schema(function = "validate_confirm"))]
pub struct ConfirmUploadRequest {
    #[validate(length(min = 1, message = "fileKey is required"))]
    pub file_key: String,
    pub entity_type: String,
    pub entity_id: DbId,
    #[validate(length(min = 1, message = "fileName is required"))]
    pub file_name: String,
    pub mime_type: String,
    pub category: String,
    pub size_bytes: Option<i64>,
}

fn validate_confirm(input: &ConfirmUploadRequest) -> Result<(), ValidationError> {
    check_file_fields(&input.entity_type, &input.category, &input.mime_type)
        .map_err(rule_violation)?;
    match input.size_bytes {
        Some(size) if !(0..=MAX_FILE_SIZE_BYTES).contains(&size) => {
            Err(rule_violation(CoreError::Validation(format!(
                "sizeBytes must be between 0 and {MAX_FILE_SIZE_BYTES}"
            ))))
        }
        _ => Ok(()),
    }
}

fn check_file_fields(entity_type: &str, category: &str, mime_type: &str) -> Result<(), CoreError> {
    check_entity_type(entity_type)?;
    check_category(category)?;
    check_mime_for_category(mime_type, category)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresignResponse {
    pub upload_url: String,
    pub file_key: String,
    pub public_url: String,
    pub expires_in: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadResponse {
    pub download_url: String,
    pub expires_in: u64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/uploads/presign
pub async fn presign(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(input): ValidatedJson<PresignRequest>,
) -> AppResult<ApiResponse<PresignResponse>> {
    ensure_entity(&state.pool, &input.entity_type, input.entity_id).await?;

    let file_key = build_file_key(
        &input.entity_type,
        input.entity_id,
        &input.category,
        &input.file_name,
    );
    let expires_in = state.config.storage.presign_expiry_secs;

    let upload_url = state
        .storage
        .presign_put(&file_key, &input.file_type, Duration::from_secs(expires_in))
        .await?;
    let public_url = state.storage.public_url(&file_key);

    tracing::debug!(file_key = %file_key, user_id = %auth.user_id, "Upload URL issued");

    Ok(ApiResponse::ok(PresignResponse {
        upload_url,
        file_key,
        public_url,
        expires_in,
    }))
}

/// POST /api/uploads/confirm
pub async fn confirm(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(input): ValidatedJson<ConfirmUploadRequest>,
) -> AppResult<ApiResponse<Upload>> {
    ensure_entity(&state.pool, &input.entity_type, input.entity_id).await?;
    check_key_belongs(&input.file_key, &input.entity_type, input.entity_id)?;

    let (vehicle_id, event_id) = match input.entity_type.as_str() {
        ENTITY_VEHICLE => (Some(input.entity_id), None),
        _ => (None, Some(input.entity_id)),
    };

    let file_url = state.storage.public_url(&input.file_key);
    let upload = UploadRepo::create(
        &state.pool,
        &CreateUpload {
            entity_type: input.entity_type,
            entity_id: input.entity_id,
            vehicle_id,
            event_id,
            file_name: input.file_name,
            file_key: input.file_key,
            file_url,
            mime_type: input.mime_type,
            category: input.category,
            size_bytes: input.size_bytes,
            uploaded_by_id: auth.user_id,
        },
    )
    .await?;

    tracing::info!(upload_id = %upload.id, file_key = %upload.file_key, user_id = %auth.user_id, "Upload confirmed");
    Ok(ApiResponse::created(upload).with_message("File upload confirmed."))
}

/// GET /api/uploads?entityType&entityId&category
///
/// Newest first.
pub async fn list(
    State(state): State<AppState>,
    ValidQuery(filter): ValidQuery<UploadFilter>,
) -> AppResult<ApiResponse<Vec<Upload>>> {
    let uploads = UploadRepo::list(&state.pool, &filter).await?;
    Ok(ApiResponse::list(uploads))
}

/// GET /api/uploads/{id}/download
pub async fn download(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<DbId>,
) -> AppResult<ApiResponse<DownloadResponse>> {
    let upload = UploadRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Upload", id))?;

    let download_url = state
        .storage
        .presign_get(&upload.file_key, Duration::from_secs(DOWNLOAD_URL_EXPIRY_SECS))
        .await?;

    Ok(ApiResponse::ok(DownloadResponse {
        download_url,
        expires_in: DOWNLOAD_URL_EXPIRY_SECS,
    }))
}

/// DELETE /api/uploads/{id}
///
/// The object is removed first; a storage failure is logged and the
/// metadata row is deleted regardless.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidPath(id): ValidPath<DbId>,
) -> AppResult<ApiResponse<()>> {
    let upload = UploadRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Upload", id))?;

    if !can_modify(upload.uploaded_by_id, auth.user_id, &auth.role) {
        return Err(AppError::forbidden(
            "You do not have permission to delete this file.",
        ));
    }

    if let Err(e) = state.storage.delete_object(&upload.file_key).await {
        tracing::warn!(upload_id = %id, file_key = %upload.file_key, error = %e, "Failed to delete object from storage");
    }

    if !UploadRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Upload", id));
    }
    tracing::info!(upload_id = %id, user_id = %auth.user_id, "Upload deleted");
    Ok(ApiResponse::message("File deleted successfully."))
}

async fn ensure_entity(pool: &DbPool, entity_type: &str, entity_id: DbId) -> AppResult<()> {
    let exists = match entity_type {
        ENTITY_VEHICLE => VehicleRepo::exists(pool, entity_id).await?,
        ENTITY_EVENT => EventRepo::exists(pool, entity_id).await?,
        other => {
            return Err(AppError::BadRequest(format!("Unknown entity type: {other}")));
        }
    };
    if exists {
        Ok(())
    } else if entity_type == ENTITY_VEHICLE {
        Err(AppError::not_found("Vehicle", entity_id))
    } else {
        Err(AppError::not_found("Event", entity_id))
    }
}
