//! Handlers for the `/parts` resource (inventory).

use axum::extract::State;
use pitwall_core::error::CoreError;
use pitwall_core::inventory::{
    apply_adjustment, signed, summarize_inventory, InventorySummary, StockLine,
};
use pitwall_core::types::DbId;
use pitwall_core::validation::rule_violation;
use pitwall_db::models::part::{CreatePart, PartFilter, PartResponse, UpdatePart};
use pitwall_db::repositories::{PartRepo, VehicleRepo};
use pitwall_db::DbPool;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::error::{AppError, AppResult};
use crate::extract::{ValidPath, ValidQuery, ValidatedJson};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Request body for `PATCH /parts/{id}/adjust`.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
#[validate(schema(function = "validate_adjustment"))]
pub struct AdjustQuantityRequest {
    /// Signed change to apply; negative values consume stock.
    pub adjustment: i32,
    pub notes: Option<String>,
}

fn validate_adjustment(input: &AdjustQuantityRequest) -> Result<(), ValidationError> {
    if input.adjustment == 0 {
        return Err(rule_violation(CoreError::Validation(
            "adjustment must be a non-zero integer".into(),
        )));
    }
    Ok(())
}

/// POST /api/parts
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(input): ValidatedJson<CreatePart>,
) -> AppResult<ApiResponse<PartResponse>> {
    ensure_vehicle(&state.pool, input.vehicle_id).await?;

    let part = PartRepo::create(&state.pool, &input).await?;
    tracing::info!(part_id = %part.id, user_id = %auth.user_id, "Part created");
    Ok(ApiResponse::created(PartResponse::from(part)).with_message("Part created successfully."))
}

/// GET /api/parts?category&vehicleId&lowStock&search
///
/// Ordered by category, then name.
pub async fn list(
    State(state): State<AppState>,
    ValidQuery(filter): ValidQuery<PartFilter>,
) -> AppResult<ApiResponse<Vec<PartResponse>>> {
    let parts = PartRepo::list(&state.pool, &filter).await?;
    Ok(ApiResponse::list(
        parts.into_iter().map(PartResponse::from).collect(),
    ))
}

/// GET /api/parts/summary
pub async fn summary(State(state): State<AppState>) -> AppResult<ApiResponse<InventorySummary>> {
    let parts = PartRepo::list_all(&state.pool).await?;
    let lines: Vec<StockLine> = parts.iter().map(|p| p.to_stock_line()).collect();
    Ok(ApiResponse::ok(summarize_inventory(&lines)))
}

/// GET /api/parts/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<DbId>,
) -> AppResult<ApiResponse<PartResponse>> {
    let part = PartRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Part", id))?;
    Ok(ApiResponse::ok(PartResponse::from(part)))
}

/// PUT /api/parts/{id}
///
/// `"vehicleId": null` unlinks the part from its vehicle.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidPath(id): ValidPath<DbId>,
    ValidatedJson(input): ValidatedJson<UpdatePart>,
) -> AppResult<ApiResponse<PartResponse>> {
    if PartRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::not_found("Part", id));
    }
    ensure_vehicle(&state.pool, input.vehicle_id.flatten()).await?;

    let part = PartRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Part", id))?;
    tracing::info!(part_id = %id, user_id = %auth.user_id, "Part updated");
    Ok(ApiResponse::ok(PartResponse::from(part)).with_message("Part updated successfully."))
}

/// PATCH /api/parts/{id}/adjust
pub async fn adjust_quantity(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidPath(id): ValidPath<DbId>,
    ValidatedJson(input): ValidatedJson<AdjustQuantityRequest>,
) -> AppResult<ApiResponse<PartResponse>> {
    let current = PartRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Part", id))?;

    let quantity = apply_adjustment(current.quantity, input.adjustment)?;

    let part = PartRepo::set_quantity(&state.pool, id, quantity)
        .await?
        .ok_or_else(|| AppError::not_found("Part", id))?;

    tracing::info!(
        part_id = %id,
        user_id = %auth.user_id,
        adjustment = input.adjustment,
        quantity = part.quantity,
        notes = input.notes.as_deref().unwrap_or(""),
        "Part quantity adjusted",
    );

    let message = format!(
        "Quantity adjusted by {}. New quantity: {}",
        signed(input.adjustment),
        part.quantity
    );
    Ok(ApiResponse::ok(PartResponse::from(part)).with_message(message))
}

/// DELETE /api/parts/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidPath(id): ValidPath<DbId>,
) -> AppResult<ApiResponse<()>> {
    if !PartRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Part", id));
    }
    tracing::info!(part_id = %id, user_id = %auth.user_id, "Part deleted");
    Ok(ApiResponse::message("Part deleted successfully."))
}

async fn ensure_vehicle(pool: &DbPool, vehicle_id: Option<DbId>) -> AppResult<()> {
    if let Some(id) = vehicle_id {
        if !VehicleRepo::exists(pool, id).await? {
            return Err(AppError::not_found("Vehicle", id));
        }
    }
    Ok(())
}
