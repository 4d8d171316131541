//! Handlers for the `/events` resource.

use axum::extract::State;
use pitwall_core::events::check_date_range;
use pitwall_core::types::DbId;
use pitwall_db::models::event::{CreateEvent, Event, UpdateEvent};
use pitwall_db::repositories::EventRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{ValidPath, ValidatedJson};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/events
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(input): ValidatedJson<CreateEvent>,
) -> AppResult<ApiResponse<Event>> {
    let event = EventRepo::create(&state.pool, &input).await?;
    tracing::info!(event_id = %event.id, user_id = %auth.user_id, "Event created");
    Ok(ApiResponse::created(event).with_message("Event created successfully."))
}

/// GET /api/events
///
/// Ordered by start date, soonest first.
pub async fn list(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<Event>>> {
    let events = EventRepo::list(&state.pool).await?;
    Ok(ApiResponse::list(events))
}

/// GET /api/events/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<DbId>,
) -> AppResult<ApiResponse<Event>> {
    let event = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Event", id))?;
    Ok(ApiResponse::ok(event))
}

/// PUT /api/events/{id}
///
/// The date order is checked against the row as it will be after the
/// patch, so moving only one end of the range is still validated.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidPath(id): ValidPath<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateEvent>,
) -> AppResult<ApiResponse<Event>> {
    let current = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Event", id))?;

    let (start, end) = input.effective_dates(&current);
    check_date_range(start, end)?;

    let event = EventRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Event", id))?;
    tracing::info!(event_id = %id, user_id = %auth.user_id, "Event updated");
    Ok(ApiResponse::ok(event).with_message("Event updated successfully."))
}

/// DELETE /api/events/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidPath(id): ValidPath<DbId>,
) -> AppResult<ApiResponse<()>> {
    if !EventRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Event", id));
    }
    tracing::info!(event_id = %id, user_id = %auth.user_id, "Event deleted");
    Ok(ApiResponse::message("Event deleted successfully."))
}
