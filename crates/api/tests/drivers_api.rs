//! Driver profiles and setup sheets, including setup sheet ownership.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get_auth, post_json_auth, put_json_auth};
use pitwall_db::repositories::SetupSheetRepo;
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Drivers
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn driver_for_missing_user_is_404(pool: PgPool) {
    let (_user, token) = common::user_with_token(&pool, "user").await;
    let app = common::build_test_app(pool);
    let missing = uuid::Uuid::new_v4();

    let response = post_json_auth(app, "/api/drivers", json!({ "userId": missing }), &token).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["error"],
        format!("User with id {missing} not found")
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn second_profile_for_same_user_is_409(pool: PgPool) {
    let (user, token) = common::user_with_token(&pool, "user").await;
    common::create_driver(&pool, &user).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(app, "/api/drivers", json!({ "userId": user.id }), &token).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(response).await["error"],
        "A driver profile already exists for this user."
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn driver_embeds_user_summary(pool: PgPool) {
    let (_writer, token) = common::user_with_token(&pool, "user").await;
    let racer = common::create_user(&pool, "racer@team.com", "user").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/drivers",
        json!({
            "userId": racer.id,
            "licenseNumber": "FIA-C-9921",
            "dateOfBirth": "1998-07-04",
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await["data"].clone();
    assert_eq!(created["user"]["email"], "racer@team.com");
    assert_eq!(created["dateOfBirth"], "1998-07-04");
    let id = created["id"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/api/drivers/{id}"),
        json!({ "nationality": "Irish" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await["data"].clone();
    assert_eq!(updated["nationality"], "Irish");
    assert_eq!(updated["licenseNumber"], "FIA-C-9921");

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/drivers", &token).await;
    let list = body_json(response).await;
    assert_eq!(list["count"], 1);
    assert_eq!(list["data"][0]["user"]["id"], racer.id.to_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn changing_the_owning_user_is_rejected(pool: PgPool) {
    let (user, token) = common::user_with_token(&pool, "admin").await;
    let driver = common::create_driver(&pool, &user).await;
    let app = common::build_test_app(pool);

    let response = put_json_auth(
        app,
        &format!("/api/drivers/{}", driver.id),
        json!({ "userId": uuid::Uuid::new_v4() }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Setup sheets
// ---------------------------------------------------------------------------

async fn create_setup(pool: &PgPool, token: &str) -> String {
    let vehicle = common::create_vehicle(pool, "Porsche", "911 GT3 R").await;
    let event = common::create_event(pool, "Spa 6h").await;
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/setups",
        json!({
            "vehicleId": vehicle.id,
            "eventId": event.id,
            "sessionType": "Qualifying",
            "tyrePressureFL": 26.5,
            "downforceLevel": "High",
        }),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn setup_for_missing_vehicle_is_404(pool: PgPool) {
    let (_user, token) = common::user_with_token(&pool, "user").await;
    let event = common::create_event(&pool, "Spa 6h").await;
    let app = common::build_test_app(pool);
    let missing = uuid::Uuid::new_v4();

    let response = post_json_auth(
        app,
        "/api/setups",
        json!({ "vehicleId": missing, "eventId": event.id, "sessionType": "Race" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["error"],
        format!("Vehicle with id {missing} not found")
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn setup_for_missing_event_is_404(pool: PgPool) {
    let (_user, token) = common::user_with_token(&pool, "user").await;
    let vehicle = common::create_vehicle(&pool, "Porsche", "911 GT3 R").await;
    let app = common::build_test_app(pool.clone());
    let missing = uuid::Uuid::new_v4();

    let response = post_json_auth(
        app,
        "/api/setups",
        json!({ "vehicleId": vehicle.id, "eventId": missing, "sessionType": "Race" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["error"],
        format!("Event with id {missing} not found")
    );
    assert_eq!(setup_count(&pool, &token).await, 0);
}

async fn setup_count(pool: &PgPool, token: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, "/api/setups", token).await;
    body_json(response).await["count"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn setup_can_move_to_another_vehicle_and_event(pool: PgPool) {
    let (_user, token) = common::user_with_token(&pool, "user").await;
    let id = create_setup(&pool, &token).await;
    let vehicle = common::create_vehicle(&pool, "Ferrari", "296 GT3").await;
    let event = common::create_event(&pool, "Monza 1000km").await;
    let app = common::build_test_app(pool);

    let response = put_json_auth(
        app,
        &format!("/api/setups/{id}"),
        json!({ "vehicleId": vehicle.id, "eventId": event.id }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let sheet = body_json(response).await["data"].clone();
    assert_eq!(sheet["vehicleId"], vehicle.id.to_string());
    assert_eq!(sheet["eventId"], event.id.to_string());
    assert_eq!(sheet["tyrePressureFL"], 26.5);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn moving_setup_to_missing_vehicle_is_404(pool: PgPool) {
    let (_user, token) = common::user_with_token(&pool, "user").await;
    let id = create_setup(&pool, &token).await;
    let before = SetupSheetRepo::find_by_id(&pool, id.parse().unwrap())
        .await
        .unwrap()
        .unwrap();
    let app = common::build_test_app(pool.clone());
    let missing = uuid::Uuid::new_v4();

    let response = put_json_auth(
        app,
        &format!("/api/setups/{id}"),
        json!({ "vehicleId": missing, "notes": "Swap chassis" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["error"],
        format!("Vehicle with id {missing} not found")
    );
    let after = SetupSheetRepo::find_by_id(&pool, id.parse().unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after.vehicle_id, before.vehicle_id);
    assert!(after.notes.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn setup_records_creator_and_corner_pressures(pool: PgPool) {
    let (owner, token) = common::user_with_token(&pool, "user").await;
    let id = create_setup(&pool, &token).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, &format!("/api/setups/{id}"), &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let sheet = body_json(response).await["data"].clone();
    assert_eq!(sheet["createdById"], owner.id.to_string());
    assert_eq!(sheet["tyrePressureFL"], 26.5);
    assert_eq!(sheet["downforceLevel"], "High");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn only_creator_or_admin_may_change_a_setup(pool: PgPool) {
    let (_owner, owner_token) = common::user_with_token(&pool, "user").await;
    let (_other, other_token) = common::user_with_token(&pool, "user").await;
    let (_admin, admin_token) = common::user_with_token(&pool, "admin").await;
    let id = create_setup(&pool, &owner_token).await;

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/api/setups/{id}"),
        json!({ "notes": "Stiffer rear" }),
        &other_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        body_json(response).await["error"],
        "You do not have permission to update this setup sheet."
    );

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/setups/{id}"), &other_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/api/setups/{id}"),
        json!({ "notes": "Stiffer rear" }),
        &owner_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["notes"], "Stiffer rear");

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, &format!("/api/setups/{id}"), &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let gone = SetupSheetRepo::find_by_id(&pool, id.parse().unwrap()).await.unwrap();
    assert!(gone.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn setup_list_filters_by_event(pool: PgPool) {
    let (_user, token) = common::user_with_token(&pool, "user").await;
    create_setup(&pool, &token).await;
    let other_event = common::create_event(&pool, "Monza 1000km").await;
    let app = common::build_test_app(pool);

    let response = get_auth(
        app,
        &format!("/api/setups?eventId={}", other_event.id),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["count"], 0);
}
