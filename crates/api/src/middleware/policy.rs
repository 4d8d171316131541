//! Route policy enforcement.
//!
//! One middleware resolves every request against
//! [`pitwall_core::access::ROUTE_POLICIES`]. Public routes pass straight
//! through; everything else needs a valid token and, for role-restricted
//! routes, a role from the allow-list. The decoded [`AuthUser`] is stored in
//! the request extensions for handlers.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use pitwall_core::access::{self, Access};
use pitwall_core::roles::role_allowed;

use super::auth::{authenticate, AuthUser};
use crate::error::AppError;
use crate::state::AppState;

/// Reject with 403 unless `user.role` is one of `allowed`.
pub fn require_role(user: &AuthUser, allowed: &[&str]) -> Result<(), AppError> {
    if role_allowed(&user.role, allowed) {
        return Ok(());
    }
    Err(AppError::forbidden(format!(
        "Access denied. Required role(s): {}. Your role: {}.",
        allowed.join(", "),
        user.role
    )))
}

pub async fn enforce_route_policy(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let rule = access::resolve(request.method().as_str(), request.uri().path());

    match rule {
        Access::Public => {}
        Access::Authenticated => {
            let user = authenticate(request.headers(), &state.config.jwt)?;
            request.extensions_mut().insert(user);
        }
        Access::Roles(allowed) => {
            let user = authenticate(request.headers(), &state.config.jwt)?;
            if let Err(err) = require_role(&user, allowed) {
                tracing::debug!(
                    user_id = %user.user_id,
                    role = %user.role,
                    path = %request.uri().path(),
                    "Route denied by policy",
                );
                return Err(err);
            }
            request.extensions_mut().insert(user);
        }
    }

    Ok(next.run(request).await)
}
