//! Handlers for the `/vehicles` resource.

use axum::extract::State;
use pitwall_core::types::DbId;
use pitwall_db::models::vehicle::{CreateVehicle, UpdateVehicle, Vehicle};
use pitwall_db::repositories::VehicleRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{ValidPath, ValidatedJson};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/vehicles
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(input): ValidatedJson<CreateVehicle>,
) -> AppResult<ApiResponse<Vehicle>> {
    let vehicle = VehicleRepo::create(&state.pool, &input).await?;
    tracing::info!(vehicle_id = %vehicle.id, user_id = %auth.user_id, "Vehicle created");
    Ok(ApiResponse::created(vehicle).with_message("Vehicle created successfully."))
}

/// GET /api/vehicles
pub async fn list(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<Vehicle>>> {
    let vehicles = VehicleRepo::list(&state.pool).await?;
    Ok(ApiResponse::list(vehicles))
}

/// GET /api/vehicles/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<DbId>,
) -> AppResult<ApiResponse<Vehicle>> {
    let vehicle = VehicleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Vehicle", id))?;
    Ok(ApiResponse::ok(vehicle))
}

/// PUT /api/vehicles/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidPath(id): ValidPath<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateVehicle>,
) -> AppResult<ApiResponse<Vehicle>> {
    let vehicle = VehicleRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Vehicle", id))?;
    tracing::info!(vehicle_id = %id, user_id = %auth.user_id, "Vehicle updated");
    Ok(ApiResponse::ok(vehicle).with_message("Vehicle updated successfully."))
}

/// DELETE /api/vehicles/{id}
///
/// Setup sheets and lap times for the vehicle cascade; linked parts are
/// unlinked.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidPath(id): ValidPath<DbId>,
) -> AppResult<ApiResponse<()>> {
    if !VehicleRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Vehicle", id));
    }
    tracing::info!(vehicle_id = %id, user_id = %auth.user_id, "Vehicle deleted");
    Ok(ApiResponse::message("Vehicle deleted successfully."))
}
