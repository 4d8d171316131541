//! Handlers for the `/drivers` resource.
//!
//! Every response embeds a summary of the driver's user account.

use axum::extract::State;
use pitwall_core::error::CoreError;
use pitwall_core::types::DbId;
use pitwall_db::models::driver::{CreateDriver, DriverResponse, UpdateDriver};
use pitwall_db::repositories::{DriverRepo, UserRepo};
use pitwall_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::extract::{ValidPath, ValidatedJson};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/drivers
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(input): ValidatedJson<CreateDriver>,
) -> AppResult<ApiResponse<DriverResponse>> {
    if UserRepo::find_by_id(&state.pool, input.user_id).await?.is_none() {
        return Err(AppError::not_found("User", input.user_id));
    }
    if DriverRepo::find_by_user_id(&state.pool, input.user_id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "A driver profile already exists for this user.".into(),
        )));
    }

    let driver = DriverRepo::create(&state.pool, &input).await?;
    tracing::info!(driver_id = %driver.id, user_id = %auth.user_id, "Driver created");

    let detail = load(&state.pool, driver.id).await?;
    Ok(ApiResponse::created(detail).with_message("Driver profile created successfully."))
}

/// GET /api/drivers
pub async fn list(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<DriverResponse>>> {
    let drivers = DriverRepo::list(&state.pool).await?;
    Ok(ApiResponse::list(
        drivers.into_iter().map(DriverResponse::from).collect(),
    ))
}

/// GET /api/drivers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<DbId>,
) -> AppResult<ApiResponse<DriverResponse>> {
    Ok(ApiResponse::ok(load(&state.pool, id).await?))
}

/// PUT /api/drivers/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidPath(id): ValidPath<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateDriver>,
) -> AppResult<ApiResponse<DriverResponse>> {
    if !DriverRepo::update(&state.pool, id, &input).await? {
        return Err(AppError::not_found("Driver", id));
    }
    tracing::info!(driver_id = %id, user_id = %auth.user_id, "Driver updated");

    let detail = load(&state.pool, id).await?;
    Ok(ApiResponse::ok(detail).with_message("Driver profile updated successfully."))
}

/// DELETE /api/drivers/{id}
///
/// Removes the profile only; the user account stays.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidPath(id): ValidPath<DbId>,
) -> AppResult<ApiResponse<()>> {
    if !DriverRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Driver", id));
    }
    tracing::info!(driver_id = %id, user_id = %auth.user_id, "Driver deleted");
    Ok(ApiResponse::message("Driver profile deleted successfully."))
}

async fn load(pool: &DbPool, id: DbId) -> AppResult<DriverResponse> {
    DriverRepo::find_by_id(pool, id)
        .await?
        .map(DriverResponse::from)
        .ok_or_else(|| AppError::not_found("Driver", id))
}
