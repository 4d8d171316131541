//! JWT-based identity extraction.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use pitwall_core::types::DbId;

use crate::auth::jwt::{validate_token, JwtConfig};
use crate::error::{AppError, JWT_SECRET_MISSING};
use crate::state::AppState;

/// Authenticated caller, decoded from the `Authorization: Bearer` header.
///
/// The route policy middleware stores it in the request extensions; the
/// extractor reuses that copy and only decodes the header itself when the
/// middleware did not run.
///
/// ```ignore
/// async fn my_handler(auth: AuthUser) -> AppResult<ApiResponse<()>> {
///     tracing::info!(user_id = %auth.user_id, role = %auth.role, "handling request");
///     Ok(ApiResponse::message("done"))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub email: String,
    pub role: String,
}

/// Decode the caller's identity from request headers.
///
/// Checks run in a fixed order: header present, secret configured, token valid.
pub fn authenticate(headers: &HeaderMap, jwt: &JwtConfig) -> Result<AuthUser, AppError> {
    let token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::unauthorized("Access denied. No token provided."))?;

    let secret = jwt
        .signing_secret()
        .ok_or_else(|| AppError::ServerConfig(JWT_SECRET_MISSING.into()))?;

    let claims = validate_token(token, secret)
        .map_err(|_| AppError::unauthorized("Invalid or expired token."))?;

    Ok(AuthUser {
        user_id: claims.sub,
        email: claims.email,
        role: claims.role,
    })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }
        authenticate(&parts.headers, &state.config.jwt)
    }
}
