//! HTTP-level integration tests for registration, login, `me` and the
//! authentication gate.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, post_json, MemoryStore, TEST_PASSWORD};
use pitwall_db::models::driver::CreateDriver;
use pitwall_db::repositories::{DriverRepo, UserRepo};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_returns_token_and_user_role(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = json!({
        "email": "a@b.com",
        "password": "longenough1",
        "firstName": "A",
        "lastName": "B",
    });
    let response = post_json(app, "/api/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "User registered successfully.");
    assert!(json["data"]["token"].is_string());
    assert_eq!(json["data"]["user"]["role"], "user");
    assert_eq!(json["data"]["user"]["email"], "a@b.com");
    assert_eq!(json["data"]["user"]["firstName"], "A");
    assert!(json["data"]["user"].get("passwordHash").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_cannot_choose_a_role(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = json!({
        "email": "boss@team.com",
        "password": "longenough1",
        "firstName": "B",
        "lastName": "Oss",
        "role": "admin",
    });
    let response = post_json(app, "/api/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_rejects_duplicate_email_case_insensitively(pool: PgPool) {
    common::create_user(&pool, "crew@team.com", "user").await;
    let app = common::build_test_app(pool);

    let body = json!({
        "email": "Crew@Team.com",
        "password": "longenough1",
        "firstName": "C",
        "lastName": "Rew",
    });
    let response = post_json(app, "/api/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["error"], "An account with this email address already exists.");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_rejects_short_password(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let body = json!({
        "email": "short@team.com",
        "password": "1234567",
        "firstName": "S",
        "lastName": "Hort",
    });
    let response = post_json(app, "/api/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Password must be at least 8 characters long.");
    assert!(UserRepo::find_by_email(&pool, "short@team.com")
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_rejects_bad_email(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = json!({
        "email": "not-an-email",
        "password": "longenough1",
        "firstName": "N",
        "lastName": "E",
    });
    let response = post_json(app, "/api/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid email format.");
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_lowercases_email(pool: PgPool) {
    let user = common::create_user(&pool, "driver@team.com", "user").await;
    let app = common::build_test_app(pool);

    let body = json!({ "email": "  DRIVER@team.com ", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Login successful.");
    assert_eq!(json["data"]["user"]["id"], user.id.to_string());
    assert!(json["data"]["token"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_wrong_password_and_unknown_email_look_the_same(pool: PgPool) {
    common::create_user(&pool, "driver@team.com", "user").await;

    let app = common::build_test_app(pool.clone());
    let wrong = post_json(
        app,
        "/api/auth/login",
        json!({ "email": "driver@team.com", "password": "incorrect-password" }),
    )
    .await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    let wrong = body_json(wrong).await;

    let app = common::build_test_app(pool);
    let unknown = post_json(
        app,
        "/api/auth/login",
        json!({ "email": "nobody@team.com", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    let unknown = body_json(unknown).await;

    assert_eq!(wrong["error"], "Invalid email or password.");
    assert_eq!(wrong["error"], unknown["error"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_refuses_deactivated_account(pool: PgPool) {
    let user = common::create_user(&pool, "gone@team.com", "user").await;
    UserRepo::set_active(&pool, user.id, false).await.unwrap();
    let app = common::build_test_app(pool);

    let body = json!({ "email": "gone@team.com", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        body_json(response).await["error"],
        "Account is deactivated. Contact an administrator."
    );
}

// ---------------------------------------------------------------------------
// Me
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn me_without_driver_profile_has_null_driver(pool: PgPool) {
    let (user, token) = common::user_with_token(&pool, "viewer").await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/auth/me", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["id"], user.id.to_string());
    assert_eq!(json["data"]["role"], "viewer");
    assert_eq!(json["data"]["isActive"], true);
    assert!(json["data"]["driver"].is_null());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn me_includes_driver_profile(pool: PgPool) {
    let (user, token) = common::user_with_token(&pool, "user").await;
    DriverRepo::create(
        &pool,
        &CreateDriver {
            user_id: user.id,
            license_number: Some("FIA-1234".into()),
            nationality: Some("British".into()),
            date_of_birth: None,
            bio: None,
            emergency_contact: None,
            medical_notes: None,
        },
    )
    .await
    .unwrap();
    let app = common::build_test_app(pool);

    let json = body_json(get_auth(app, "/api/auth/me", &token).await).await;

    assert_eq!(json["data"]["driver"]["licenseNumber"], "FIA-1234");
    assert_eq!(json["data"]["driver"]["userId"], user.id.to_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn me_for_deleted_user_is_404(pool: PgPool) {
    let (user, token) = common::user_with_token(&pool, "user").await;
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .unwrap();
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/auth/me", &token).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Authentication gate
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_token_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/vehicles").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Access denied. No token provided.");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn garbage_token_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/vehicles", "not.a.jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Invalid or expired token.");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_secret_is_500_on_protected_routes(pool: PgPool) {
    let mut config = common::test_config();
    config.jwt.secret = None;
    let app = common::build_test_app_with(pool, config, Arc::new(MemoryStore::default()));

    let response = get_auth(app, "/api/vehicles", "any-token").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await["error"],
        "Server configuration error: JWT secret not set."
    );
}
