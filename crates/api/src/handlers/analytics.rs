//! Handlers for the `/analytics` resource: lap time records and the
//! leaderboard summary built from them.

use axum::extract::State;
use pitwall_core::analytics::{summarize_laps, LapSample, LapSummary};
use pitwall_core::types::DbId;
use pitwall_db::models::lap_time::{CreateLapTime, LapTimeFilter, LapTimeResponse, UpdateLapTime};
use pitwall_db::repositories::{DriverRepo, EventRepo, LapTimeRepo, VehicleRepo};
use pitwall_db::DbPool;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{ValidPath, ValidQuery, ValidatedJson};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Query parameters for `GET /analytics/summary`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryQuery {
    pub event_id: Option<DbId>,
}

/// GET /api/analytics/summary?eventId
///
/// Only laps flagged valid count towards the leaderboards and trends.
pub async fn summary(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<SummaryQuery>,
) -> AppResult<ApiResponse<LapSummary>> {
    let laps = LapTimeRepo::list_valid(&state.pool, query.event_id).await?;
    let samples: Vec<LapSample> = laps.iter().map(|lap| lap.to_sample()).collect();
    Ok(ApiResponse::ok(summarize_laps(&samples)))
}

/// GET /api/analytics/laptimes?eventId&driverId&vehicleId&sessionType
pub async fn list_lap_times(
    State(state): State<AppState>,
    ValidQuery(filter): ValidQuery<LapTimeFilter>,
) -> AppResult<ApiResponse<Vec<LapTimeResponse>>> {
    let laps = LapTimeRepo::list(&state.pool, &filter).await?;
    Ok(ApiResponse::list(
        laps.into_iter().map(LapTimeResponse::from).collect(),
    ))
}

/// GET /api/analytics/laptimes/{id}
pub async fn get_lap_time(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<DbId>,
) -> AppResult<ApiResponse<LapTimeResponse>> {
    Ok(ApiResponse::ok(load(&state.pool, id).await?))
}

/// POST /api/analytics/laptimes
pub async fn create_lap_time(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(input): ValidatedJson<CreateLapTime>,
) -> AppResult<ApiResponse<LapTimeResponse>> {
    ensure_references(
        &state.pool,
        Some(input.driver_id),
        Some(input.vehicle_id),
        Some(input.event_id),
    )
    .await?;

    let lap = LapTimeRepo::create(&state.pool, &input).await?;
    tracing::info!(
        lap_time_id = %lap.id,
        driver_id = %lap.driver_id,
        lap_time_ms = lap.lap_time_ms,
        user_id = %auth.user_id,
        "Lap time recorded",
    );

    let detail = load(&state.pool, lap.id).await?;
    Ok(ApiResponse::created(detail).with_message("Lap time recorded successfully."))
}

/// PUT /api/analytics/laptimes/{id}
pub async fn update_lap_time(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidPath(id): ValidPath<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateLapTime>,
) -> AppResult<ApiResponse<LapTimeResponse>> {
    ensure_references(&state.pool, input.driver_id, input.vehicle_id, input.event_id).await?;

    if !LapTimeRepo::update(&state.pool, id, &input).await? {
        return Err(AppError::not_found("LapTime", id));
    }
    tracing::info!(lap_time_id = %id, user_id = %auth.user_id, "Lap time updated");

    let detail = load(&state.pool, id).await?;
    Ok(ApiResponse::ok(detail).with_message("Lap time updated successfully."))
}

/// DELETE /api/analytics/laptimes/{id}
pub async fn delete_lap_time(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidPath(id): ValidPath<DbId>,
) -> AppResult<ApiResponse<()>> {
    if !LapTimeRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("LapTime", id));
    }
    tracing::info!(lap_time_id = %id, user_id = %auth.user_id, "Lap time deleted");
    Ok(ApiResponse::message("Lap time deleted successfully."))
}

async fn load(pool: &DbPool, id: DbId) -> AppResult<LapTimeResponse> {
    LapTimeRepo::find_by_id(pool, id)
        .await?
        .map(LapTimeResponse::from)
        .ok_or_else(|| AppError::not_found("LapTime", id))
}

/// Look up each supplied reference in order: driver, vehicle, event.
/// The first missing one is reported and nothing is written.
async fn ensure_references(
    pool: &DbPool,
    driver_id: Option<DbId>,
    vehicle_id: Option<DbId>,
    event_id: Option<DbId>,
) -> AppResult<()> {
    if let Some(id) = driver_id {
        if !DriverRepo::exists(pool, id).await? {
            return Err(AppError::not_found("Driver", id));
        }
    }
    if let Some(id) = vehicle_id {
        if !VehicleRepo::exists(pool, id).await? {
            return Err(AppError::not_found("Vehicle", id));
        }
    }
    if let Some(id) = event_id {
        if !EventRepo::exists(pool, id).await? {
            return Err(AppError::not_found("Event", id));
        }
    }
    Ok(())
}
