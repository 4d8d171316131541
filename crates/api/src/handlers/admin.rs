//! Handlers for the `/admin` resource (user management).
//!
//! The route policy restricts every route here to the `admin` role.

use axum::extract::State;
use pitwall_core::roles::{check_role, ensure_not_self};
use pitwall_core::types::DbId;
use pitwall_core::validation::rule_violation;
use pitwall_db::models::user::UserResponse;
use pitwall_db::repositories::UserRepo;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::error::{AppError, AppResult};
use crate::extract::{ValidPath, ValidatedJson};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `PATCH /admin/users/{id}/role`.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
#[validate(schema(function = "validate_role_change"))]
pub struct UpdateRoleRequest {
    pub role: String,
}

fn validate_role_change(input: &UpdateRoleRequest) -> Result<(), ValidationError> {
    check_role(&input.role).map_err(rule_violation)
}

/// Request body for `PATCH /admin/users/{id}/status`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateStatusRequest {
    pub is_active: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/admin/users
///
/// Newest accounts first.
pub async fn list_users(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(ApiResponse::list(
        users.into_iter().map(UserResponse::from).collect(),
    ))
}

/// GET /api/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<DbId>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("User", id))?;
    Ok(ApiResponse::ok(UserResponse::from(user)))
}

/// PATCH /api/admin/users/{id}/role
///
/// The self-target check runs before the body is inspected, so an admin
/// aiming at their own account gets the same answer whatever they send.
pub async fn update_role(
    State(state): State<AppState>,
    admin: AuthUser,
    ValidPath(id): ValidPath<DbId>,
    body: Result<ValidatedJson<UpdateRoleRequest>, AppError>,
) -> AppResult<ApiResponse<UserResponse>> {
    ensure_not_self(id, admin.user_id, "role")?;
    let ValidatedJson(input) = body?;

    let user = UserRepo::update_role(&state.pool, id, &input.role)
        .await?
        .ok_or_else(|| AppError::not_found("User", id))?;

    tracing::info!(
        target_user_id = %id,
        admin_id = %admin.user_id,
        role = %user.role,
        "User role changed",
    );

    let message = format!("User role updated to {}.", user.role);
    Ok(ApiResponse::ok(UserResponse::from(user)).with_message(message))
}

/// PATCH /api/admin/users/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    admin: AuthUser,
    ValidPath(id): ValidPath<DbId>,
    body: Result<ValidatedJson<UpdateStatusRequest>, AppError>,
) -> AppResult<ApiResponse<UserResponse>> {
    ensure_not_self(id, admin.user_id, "account status")?;
    let ValidatedJson(input) = body?;

    let user = UserRepo::set_active(&state.pool, id, input.is_active)
        .await?
        .ok_or_else(|| AppError::not_found("User", id))?;

    tracing::info!(
        target_user_id = %id,
        admin_id = %admin.user_id,
        is_active = user.is_active,
        "User status changed",
    );

    let message = if user.is_active {
        "User account activated."
    } else {
        "User account deactivated."
    };
    Ok(ApiResponse::ok(UserResponse::from(user)).with_message(message))
}
