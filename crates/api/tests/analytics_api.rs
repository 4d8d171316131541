//! Lap time recording and the analytics summary.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json_auth, put_json_auth};
use pitwall_db::models::driver::Driver;
use pitwall_db::models::event::Event;
use pitwall_db::models::vehicle::Vehicle;
use pitwall_db::repositories::LapTimeRepo;
use serde_json::{json, Value};
use sqlx::PgPool;

struct Grid {
    token: String,
    driver: Driver,
    vehicle: Vehicle,
    event: Event,
}

async fn grid(pool: &PgPool) -> Grid {
    let (user, token) = common::user_with_token(pool, "user").await;
    Grid {
        token,
        driver: common::create_driver(pool, &user).await,
        vehicle: common::create_vehicle(pool, "Porsche", "911").await,
        event: common::create_event(pool, "Spa 6h").await,
    }
}

fn lap(grid: &Grid, lap_number: i32, lap_time_ms: i32) -> Value {
    json!({
        "driverId": grid.driver.id,
        "vehicleId": grid.vehicle.id,
        "eventId": grid.event.id,
        "sessionType": "Race",
        "lapNumber": lap_number,
        "lapTimeMs": lap_time_ms,
    })
}

async fn record(pool: &PgPool, token: &str, body: Value) -> Value {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/analytics/laptimes", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn recorded_lap_carries_names_and_formatting(pool: PgPool) {
    let grid = grid(&pool).await;
    let mut body = lap(&grid, 1, 83_456);
    body["sector1Ms"] = json!(28_100);
    body["sector2Ms"] = json!(0);

    let json = record(&pool, &grid.token, body).await;

    assert_eq!(json["message"], "Lap time recorded successfully.");
    let data = &json["data"];
    assert_eq!(data["lapTimeFormatted"], "01:23.456");
    assert_eq!(data["sector1Formatted"], "00:28.100");
    assert!(data["sector2Formatted"].is_null());
    assert_eq!(data["isValid"], true);
    assert_eq!(data["vehicleName"], "2024 Porsche 911");
    assert_eq!(data["eventName"], "Spa 6h");
    assert_eq!(data["driverName"], "Test user");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_driver_is_404_and_nothing_is_written(pool: PgPool) {
    let grid = grid(&pool).await;
    let missing = uuid::Uuid::new_v4();
    let mut body = lap(&grid, 1, 90_000);
    body["driverId"] = json!(missing);
    body["vehicleId"] = json!(uuid::Uuid::new_v4());
    let app = common::build_test_app(pool.clone());

    let response = post_json_auth(app, "/api/analytics/laptimes", body, &grid.token).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["error"],
        format!("Driver with id {missing} not found")
    );
    assert_eq!(LapTimeRepo::count(&pool).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_vehicle_is_reported_after_driver(pool: PgPool) {
    let grid = grid(&pool).await;
    let missing = uuid::Uuid::new_v4();
    let mut body = lap(&grid, 1, 90_000);
    body["vehicleId"] = json!(missing);
    body["eventId"] = json!(uuid::Uuid::new_v4());
    let app = common::build_test_app(pool);

    let response = post_json_auth(app, "/api/analytics/laptimes", body, &grid.token).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["error"],
        format!("Vehicle with id {missing} not found")
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn zero_lap_time_is_400(pool: PgPool) {
    let grid = grid(&pool).await;
    let app = common::build_test_app(pool);

    let response =
        post_json_auth(app, "/api/analytics/laptimes", lap(&grid, 1, 0), &grid.token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "lapTimeMs must be a positive integer (milliseconds)"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn summary_ignores_invalid_laps(pool: PgPool) {
    let grid = grid(&pool).await;
    record(&pool, &grid.token, lap(&grid, 1, 92_000)).await;
    record(&pool, &grid.token, lap(&grid, 2, 90_500)).await;
    let mut cut = lap(&grid, 3, 80_000);
    cut["isValid"] = json!(false);
    record(&pool, &grid.token, cut).await;

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/analytics/summary", &grid.token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let summary = body_json(response).await["data"].clone();
    assert_eq!(summary["totalLaps"], 2);
    assert_eq!(summary["bestLapsByDriver"][0]["lapTimeMs"], 90_500);
    assert_eq!(summary["bestLapsByDriver"][0]["lapTimeFormatted"], "01:30.500");
    assert_eq!(summary["bestLapsByVehicle"][0]["vehicleName"], "2024 Porsche 911");
    let trend = summary["lapTrendsByDriver"][0]["laps"].as_array().unwrap();
    assert_eq!(trend.len(), 2);
    assert_eq!(trend[0]["lapNumber"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn summary_can_be_scoped_to_an_event(pool: PgPool) {
    let grid = grid(&pool).await;
    record(&pool, &grid.token, lap(&grid, 1, 92_000)).await;
    let other = common::create_event(&pool, "Monza 1000km").await;

    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        &format!("/api/analytics/summary?eventId={}", other.id),
        &grid.token,
    )
    .await;

    let summary = body_json(response).await["data"].clone();
    assert_eq!(summary["totalLaps"], 0);
    assert!(summary["bestLapsByDriver"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_filters_by_session(pool: PgPool) {
    let grid = grid(&pool).await;
    record(&pool, &grid.token, lap(&grid, 1, 92_000)).await;
    let mut practice = lap(&grid, 1, 95_000);
    practice["sessionType"] = json!("Practice");
    record(&pool, &grid.token, practice).await;

    let app = common::build_test_app(pool);
    let response = get_auth(
        app,
        "/api/analytics/laptimes?sessionType=Practice",
        &grid.token,
    )
    .await;

    let json = body_json(response).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["data"][0]["lapTimeMs"], 95_000);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn lap_can_be_invalidated(pool: PgPool) {
    let grid = grid(&pool).await;
    let created = record(&pool, &grid.token, lap(&grid, 4, 91_000)).await;
    let id = created["data"]["id"].as_str().unwrap();

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        &format!("/api/analytics/laptimes/{id}"),
        json!({ "isValid": false, "notes": "Track limits T4" }),
        &grid.token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["isValid"], false);
    assert_eq!(data["lapTimeMs"], 91_000);
}
