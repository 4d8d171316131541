pub mod admin;
pub mod analytics;
pub mod auth;
pub mod drivers;
pub mod events;
pub mod health;
pub mod parts;
pub mod setups;
pub mod uploads;
pub mod vehicles;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree (mounted by the caller via `.nest("/api", ...)`).
///
/// Route tree:
///
/// ```text
/// /auth/register, /auth/login, /auth/me
///
/// /admin/users                     list users (admin)
/// /admin/users/{id}                get user (admin)
/// /admin/users/{id}/role           change role (PATCH, admin)
/// /admin/users/{id}/status         activate or deactivate (PATCH, admin)
///
/// /vehicles                        list, create
/// /vehicles/{id}                   get, update, delete
///
/// /events                          list, create
/// /events/{id}                     get, update, delete
/// /events/{id}/weather             forecast for the event dates
///
/// /drivers                         list, create
/// /drivers/{id}                    get, update, delete
///
/// /setups                          list (?eventId, ?vehicleId), create
/// /setups/{id}                     get, update, delete
///
/// /analytics/summary               best laps and trends (?eventId)
/// /analytics/laptimes              list (filters), create
/// /analytics/laptimes/{id}         get, update, delete
///
/// /parts                           list (filters), create
/// /parts/summary                   inventory rollup
/// /parts/{id}                      get, update, delete
/// /parts/{id}/adjust               adjust quantity (PATCH)
///
/// /uploads                         list (filters)
/// /uploads/presign                 presigned PUT URL (POST)
/// /uploads/confirm                 record an uploaded object (POST)
/// /uploads/{id}/download           presigned GET URL
/// /uploads/{id}                    delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
        .nest("/vehicles", vehicles::router())
        .nest("/events", events::router())
        .nest("/drivers", drivers::router())
        .nest("/setups", setups::router())
        .nest("/analytics", analytics::router())
        .nest("/parts", parts::router())
        .nest("/uploads", uploads::router())
}
