//! Route definitions for the `/admin` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`. Admin only (enforced by the route policy).
///
/// ```text
/// GET   /users             -> list_users
/// GET   /users/{id}        -> get_user
/// PATCH /users/{id}/role   -> update_role
/// PATCH /users/{id}/status -> update_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::list_users))
        .route("/users/{id}", get(admin::get_user))
        .route("/users/{id}/role", patch(admin::update_role))
        .route("/users/{id}/status", patch(admin::update_status))
}
