//! Handlers for the `/auth` resource (register, login, me).

use axum::extract::State;
use pitwall_core::accounts::{check_email, normalize_email};
use pitwall_core::error::CoreError;
use pitwall_core::roles::DEFAULT_ROLE;
use pitwall_core::types::DbId;
use pitwall_core::validation::rule_violation;
use pitwall_db::models::driver::Driver;
use pitwall_db::models::user::{CreateUser, User, UserResponse};
use pitwall_db::repositories::{DriverRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{check_password_strength, hash_password, verify_password};
use crate::error::{AppError, AppResult, JWT_SECRET_MISSING};
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid email or password.";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/auth/register`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[validate(schema(function = "validate_register"))]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[validate(length(min = 1, message = "firstName is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "lastName is required"))]
    pub last_name: String,
}

fn validate_register(input: &RegisterRequest) -> Result<(), ValidationError> {
    check_email(&normalize_email(&input.email)).map_err(rule_violation)?;
    check_password_strength(&input.password).map_err(rule_violation)
}

/// Request body for `POST /api/auth/login`.
#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Public user info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: DbId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role: user.role.clone(),
        }
    }
}

/// Successful authentication response returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserInfo,
}

/// The caller's account plus their driver profile, if any.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub driver: Option<Driver>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/register
///
/// Create a `user`-role account and sign the caller in.
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> AppResult<ApiResponse<AuthResponse>> {
    let email = normalize_email(&input.email);

    if UserRepo::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "An account with this email address already exists.".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email,
            password_hash,
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            role: DEFAULT_ROLE.to_string(),
        },
    )
    .await?;

    let token = issue_token(&state, &user)?;
    tracing::info!(user_id = %user.id, email = %user.email, "User registered");

    Ok(ApiResponse::created(AuthResponse {
        token,
        user: UserInfo::from(&user),
    })
    .with_message("User registered successfully."))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> AppResult<ApiResponse<AuthResponse>> {
    let email = normalize_email(&input.email);

    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))?;

    if !user.is_active {
        return Err(AppError::forbidden(
            "Account is deactivated. Contact an administrator.",
        ));
    }

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::debug!(user_id = %user.id, "Login rejected: wrong password");
        return Err(AppError::unauthorized(INVALID_CREDENTIALS));
    }

    let token = issue_token(&state, &user)?;
    tracing::info!(user_id = %user.id, "User logged in");

    Ok(ApiResponse::ok(AuthResponse {
        token,
        user: UserInfo::from(&user),
    })
    .with_message("Login successful."))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<ApiResponse<MeResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User", auth.user_id))?;

    let driver = DriverRepo::find_by_user_id(&state.pool, user.id)
        .await?
        .map(|detail| detail.driver);

    Ok(ApiResponse::ok(MeResponse {
        user: UserResponse::from(user),
        driver,
    }))
}

fn issue_token(state: &AppState, user: &User) -> AppResult<String> {
    let jwt = &state.config.jwt;
    let secret = jwt
        .signing_secret()
        .ok_or_else(|| AppError::ServerConfig(JWT_SECRET_MISSING.into()))?;

    generate_access_token(user.id, &user.email, &user.role, secret, jwt.expiry_hours)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))
}
