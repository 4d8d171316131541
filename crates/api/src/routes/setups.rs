//! Route definitions for the `/setups` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::setup;
use crate::state::AppState;

/// Routes mounted at `/setups`.
///
/// ```text
/// GET    /      -> list (?eventId, ?vehicleId)
/// POST   /      -> create
/// GET    /{id}  -> get_by_id
/// PUT    /{id}  -> update (creator or admin)
/// DELETE /{id}  -> delete (creator or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(setup::list).post(setup::create))
        .route(
            "/{id}",
            get(setup::get_by_id).put(setup::update).delete(setup::delete),
        )
}
