//! Handler for `GET /events/{id}/weather`.

use axum::extract::State;
use chrono::Utc;
use pitwall_core::error::CoreError;
use pitwall_core::types::DbId;
use pitwall_db::repositories::EventRepo;
use pitwall_weather::{build_report, EventWeather, WeatherEvent};

use crate::error::{AppError, AppResult};
use crate::extract::ValidPath;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/events/{id}/weather
///
/// Geocodes the event's venue (falling back to its location) and returns
/// current conditions plus hourly and daily forecasts for the event dates.
pub async fn event_weather(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<DbId>,
) -> AppResult<ApiResponse<EventWeather>> {
    let event = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Event", id))?;

    let coordinates = state
        .weather
        .locate(&event.venue, &event.location)
        .await?
        .ok_or_else(|| {
            CoreError::Unprocessable(format!(
                "Unable to geocode location: \"{}\". Please ensure the event location is a recognisable city or region.",
                event.location
            ))
        })?;

    let forecast = state
        .weather
        .forecast(
            coordinates,
            event.start_date.date_naive(),
            event.end_date.date_naive(),
        )
        .await?;

    tracing::debug!(
        event_id = %id,
        latitude = coordinates.latitude,
        longitude = coordinates.longitude,
        "Weather forecast fetched",
    );

    let report = build_report(
        WeatherEvent {
            id: event.id,
            name: event.name,
            venue: event.venue,
            location: event.location,
            start_date: event.start_date,
            end_date: event.end_date,
        },
        coordinates,
        forecast,
        Utc::now(),
    );
    Ok(ApiResponse::ok(report))
}
