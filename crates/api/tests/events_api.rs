//! Event CRUD and the per-event weather forecast.
//!
//! Weather tests point the client at a throwaway axum server standing in for
//! the Open-Meteo geocoding and forecast endpoints.

mod common;

use std::sync::Arc;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use common::{body_json, get_auth, post_json_auth, put_json_auth, MemoryStore};
use pitwall_db::repositories::EventRepo;
use serde_json::{json, Value};
use sqlx::PgPool;
use std::collections::HashMap;

fn brands_hatch(start: &str, end: &str) -> Value {
    json!({
        "name": "Spring Sprint",
        "type": "Race",
        "venue": "Brands Hatch",
        "location": "Kent, UK",
        "startDate": start,
        "endDate": end,
    })
}

async fn create_event(app: Router, token: &str, start: &str, end: &str) -> Value {
    let response = post_json_auth(app, "/api/events", brands_hatch(start, end), token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn end_before_start_is_rejected_and_not_stored(pool: PgPool) {
    let (_user, token) = common::user_with_token(&pool, "user").await;
    let app = common::build_test_app(pool.clone());

    let response = post_json_auth(
        app,
        "/api/events",
        brands_hatch("2026-03-15T09:00:00Z", "2026-03-14T09:00:00Z"),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "endDate must be on or after startDate"
    );
    assert!(EventRepo::list(&pool).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn single_day_event_defaults_to_upcoming(pool: PgPool) {
    let (_user, token) = common::user_with_token(&pool, "user").await;
    let app = common::build_test_app(pool);

    let event = create_event(app, &token, "2026-03-15T09:00:00Z", "2026-03-15T09:00:00Z").await;

    assert_eq!(event["status"], "Upcoming");
    assert_eq!(event["type"], "Race");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn partial_update_checks_dates_against_stored_row(pool: PgPool) {
    let (_user, token) = common::user_with_token(&pool, "user").await;
    let app = common::build_test_app(pool.clone());
    let event = create_event(app, &token, "2026-03-15T09:00:00Z", "2026-03-16T18:00:00Z").await;
    let id = event["id"].as_str().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/api/events/{id}"),
        json!({ "endDate": "2026-03-10T00:00:00Z" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        &format!("/api/events/{id}"),
        json!({ "status": "In Progress" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "In Progress");
    assert_eq!(json["message"], "Event updated successfully.");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_event_type_is_400(pool: PgPool) {
    let (_user, token) = common::user_with_token(&pool, "admin").await;
    let app = common::build_test_app(pool);

    let mut body = brands_hatch("2026-03-15T09:00:00Z", "2026-03-16T09:00:00Z");
    body["type"] = json!("Parade");
    let response = post_json_auth(app, "/api/events", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Weather
// ---------------------------------------------------------------------------

/// Spawn a fake Open-Meteo. `known` lists place names the geocoder resolves.
async fn spawn_open_meteo(known: &'static [&'static str]) -> String {
    let app = Router::new()
        .route(
            "/v1/search",
            get(move |Query(params): Query<HashMap<String, String>>| async move {
                let name = params.get("name").cloned().unwrap_or_default();
                if known.contains(&name.as_str()) {
                    Json(json!({
                        "results": [{
                            "id": 1,
                            "name": name,
                            "latitude": 51.36,
                            "longitude": 0.26,
                            "country": "United Kingdom",
                        }]
                    }))
                } else {
                    Json(json!({ "generationtime_ms": 0.4 }))
                }
            }),
        )
        .route(
            "/v1/forecast",
            get(|| async {
                Json(json!({
                    "current": {
                        "time": "2026-03-15T10:00",
                        "temperature_2m": 54.1,
                        "apparent_temperature": 50.2,
                        "precipitation": 0.02,
                        "wind_speed_10m": 11.4,
                        "wind_direction_10m": 220,
                        "wind_gusts_10m": 19.0,
                        "cloud_cover": 88,
                        "relative_humidity_2m": 81,
                        "visibility": 24000,
                        "weather_code": 61,
                    },
                    "hourly": {
                        "time": ["2026-03-15T00:00", "2026-03-15T01:00"],
                        "temperature_2m": [48.0, 47.5],
                        "precipitation_probability": [35, null],
                        "weather_code": [3, 61],
                    },
                    "daily": {
                        "time": ["2026-03-15"],
                        "temperature_2m_max": [56.0],
                        "temperature_2m_min": [44.0],
                        "weather_code": [0],
                        "sunrise": ["2026-03-15T06:12"],
                        "sunset": ["2026-03-15T18:05"],
                    },
                }))
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn app_with_weather(pool: PgPool, base: &str) -> Router {
    let mut config = common::test_config();
    config.weather.geocoding_url = format!("{base}/v1/search");
    config.weather.forecast_url = format!("{base}/v1/forecast");
    common::build_test_app_with(pool, config, Arc::new(MemoryStore::default()))
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn weather_for_missing_event_is_404(pool: PgPool) {
    let (_user, token) = common::user_with_token(&pool, "viewer").await;
    let app = common::build_test_app(pool);
    let missing = uuid::Uuid::new_v4();

    let response = get_auth(app, &format!("/api/events/{missing}/weather"), &token).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["error"],
        format!("Event with id {missing} not found")
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unresolvable_location_is_422(pool: PgPool) {
    let base = spawn_open_meteo(&[]).await;
    let (_user, token) = common::user_with_token(&pool, "user").await;
    let event = create_event(
        app_with_weather(pool.clone(), &base),
        &token,
        "2026-03-15T09:00:00Z",
        "2026-03-15T18:00:00Z",
    )
    .await;
    let id = event["id"].as_str().unwrap();

    let response = get_auth(
        app_with_weather(pool, &base),
        &format!("/api/events/{id}/weather"),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body_json(response).await["error"],
        "Unable to geocode location: \"Kent, UK\". Please ensure the event location is a recognisable city or region."
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn weather_falls_back_to_location_and_shapes_forecast(pool: PgPool) {
    // Only the bare location resolves, forcing the second geocoding attempt.
    let base = spawn_open_meteo(&["Kent, UK"]).await;
    let (_user, token) = common::user_with_token(&pool, "viewer").await;
    let (_writer, writer_token) = common::user_with_token(&pool, "user").await;
    let event = create_event(
        app_with_weather(pool.clone(), &base),
        &writer_token,
        "2026-03-15T09:00:00Z",
        "2026-03-15T18:00:00Z",
    )
    .await;
    let id = event["id"].as_str().unwrap();

    let response = get_auth(
        app_with_weather(pool, &base),
        &format!("/api/events/{id}/weather"),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["eventId"], id);
    assert_eq!(data["coordinates"]["latitude"], 51.36);
    assert_eq!(data["current"]["weatherCode"], 61);
    assert_eq!(data["current"]["condition"], "Light Rain");
    assert_eq!(data["daily"][0]["condition"], "Clear Sky");
    assert_eq!(data["daily"][0]["sunrise"], "2026-03-15T06:12");
    assert_eq!(data["hourly"].as_array().unwrap().len(), 2);
    assert_eq!(data["hourly"][1]["precipitationProbability"], 0.0);
    assert!(data["fetchedAt"].is_string());
}
