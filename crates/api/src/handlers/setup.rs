//! Handlers for the `/setups` resource.
//!
//! Anyone with a write role may create a sheet; only its creator or an
//! admin may change or remove it.

use axum::extract::State;
use pitwall_core::roles::can_modify;
use pitwall_core::types::DbId;
use pitwall_db::models::setup_sheet::{
    CreateSetupSheet, SetupSheet, SetupSheetFilter, UpdateSetupSheet,
};
use pitwall_db::repositories::{EventRepo, SetupSheetRepo, VehicleRepo};
use pitwall_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::extract::{ValidPath, ValidQuery, ValidatedJson};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/setups
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(input): ValidatedJson<CreateSetupSheet>,
) -> AppResult<ApiResponse<SetupSheet>> {
    ensure_vehicle(&state.pool, input.vehicle_id).await?;
    ensure_event(&state.pool, input.event_id).await?;

    let sheet = SetupSheetRepo::create(&state.pool, &input, auth.user_id).await?;
    tracing::info!(setup_id = %sheet.id, user_id = %auth.user_id, "Setup sheet created");
    Ok(ApiResponse::created(sheet).with_message("Setup sheet created successfully."))
}

/// GET /api/setups?eventId&vehicleId
///
/// Newest first.
pub async fn list(
    State(state): State<AppState>,
    ValidQuery(filter): ValidQuery<SetupSheetFilter>,
) -> AppResult<ApiResponse<Vec<SetupSheet>>> {
    let sheets = SetupSheetRepo::list(&state.pool, &filter).await?;
    Ok(ApiResponse::list(sheets))
}

/// GET /api/setups/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<DbId>,
) -> AppResult<ApiResponse<SetupSheet>> {
    Ok(ApiResponse::ok(load(&state.pool, id).await?))
}

/// PUT /api/setups/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidPath(id): ValidPath<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateSetupSheet>,
) -> AppResult<ApiResponse<SetupSheet>> {
    let current = load(&state.pool, id).await?;
    ensure_owner(&current, &auth, "update")?;
    if let Some(vehicle_id) = input.vehicle_id {
        ensure_vehicle(&state.pool, vehicle_id).await?;
    }
    if let Some(event_id) = input.event_id {
        ensure_event(&state.pool, event_id).await?;
    }

    let sheet = SetupSheetRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("SetupSheet", id))?;
    tracing::info!(setup_id = %id, user_id = %auth.user_id, "Setup sheet updated");
    Ok(ApiResponse::ok(sheet).with_message("Setup sheet updated successfully."))
}

/// DELETE /api/setups/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidPath(id): ValidPath<DbId>,
) -> AppResult<ApiResponse<()>> {
    let current = load(&state.pool, id).await?;
    ensure_owner(&current, &auth, "delete")?;

    if !SetupSheetRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("SetupSheet", id));
    }
    tracing::info!(setup_id = %id, user_id = %auth.user_id, "Setup sheet deleted");
    Ok(ApiResponse::message("Setup sheet deleted successfully."))
}

async fn load(pool: &DbPool, id: DbId) -> AppResult<SetupSheet> {
    SetupSheetRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("SetupSheet", id))
}

async fn ensure_vehicle(pool: &DbPool, id: DbId) -> AppResult<()> {
    if VehicleRepo::exists(pool, id).await? {
        Ok(())
    } else {
        Err(AppError::not_found("Vehicle", id))
    }
}

async fn ensure_event(pool: &DbPool, id: DbId) -> AppResult<()> {
    if EventRepo::exists(pool, id).await? {
        Ok(())
    } else {
        Err(AppError::not_found("Event", id))
    }
}

fn ensure_owner(sheet: &SetupSheet, auth: &AuthUser, action: &str) -> AppResult<()> {
    if can_modify(sheet.created_by_id, auth.user_id, &auth.role) {
        Ok(())
    } else {
        Err(AppError::forbidden(format!(
            "You do not have permission to {action} this setup sheet."
        )))
    }
}
