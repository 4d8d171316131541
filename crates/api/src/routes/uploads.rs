//! Route definitions for the `/uploads` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::upload;
use crate::state::AppState;

/// Routes mounted at `/uploads`.
///
/// ```text
/// POST   /presign        -> presign
/// POST   /confirm        -> confirm
/// GET    /               -> list (?entityType, ?entityId, ?category)
/// GET    /{id}/download  -> download
/// DELETE /{id}           -> delete (uploader or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/presign", post(upload::presign))
        .route("/confirm", post(upload::confirm))
        .route("/", get(upload::list))
        .route("/{id}/download", get(upload::download))
        .route("/{id}", delete(upload::delete))
}
