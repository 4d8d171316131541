//! Route definitions for the `/parts` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::part;
use crate::state::AppState;

/// Routes mounted at `/parts`.
///
/// ```text
/// GET    /             -> list (?category, ?vehicleId, ?lowStock, ?search)
/// POST   /             -> create
/// GET    /summary      -> summary
/// GET    /{id}         -> get_by_id
/// PUT    /{id}         -> update
/// DELETE /{id}         -> delete
/// PATCH  /{id}/adjust  -> adjust_quantity
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(part::list).post(part::create))
        .route("/summary", get(part::summary))
        .route(
            "/{id}",
            get(part::get_by_id).put(part::update).delete(part::delete),
        )
        .route("/{id}/adjust", patch(part::adjust_quantity))
}
