//! Route definitions for the `/analytics` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::analytics;
use crate::state::AppState;

/// Routes mounted at `/analytics`.
///
/// ```text
/// GET    /summary         -> summary (?eventId)
/// GET    /laptimes        -> list_lap_times (?eventId, ?driverId, ?vehicleId, ?sessionType)
/// POST   /laptimes        -> create_lap_time
/// GET    /laptimes/{id}   -> get_lap_time
/// PUT    /laptimes/{id}   -> update_lap_time
/// DELETE /laptimes/{id}   -> delete_lap_time
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/summary", get(analytics::summary))
        .route(
            "/laptimes",
            get(analytics::list_lap_times).post(analytics::create_lap_time),
        )
        .route(
            "/laptimes/{id}",
            get(analytics::get_lap_time)
                .put(analytics::update_lap_time)
                .delete(analytics::delete_lap_time),
        )
}
