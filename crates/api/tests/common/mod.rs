#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use pitwall_api::auth::jwt::{generate_access_token, JwtConfig};
use pitwall_api::auth::password::hash_password;
use pitwall_api::config::ServerConfig;
use pitwall_api::router::build_app_router;
use pitwall_api::state::AppState;
use pitwall_cloud::{ObjectStore, StorageConfig, StorageError};
use pitwall_core::uploads::build_public_url;
use pitwall_db::models::driver::{CreateDriver, Driver};
use pitwall_db::models::event::{CreateEvent, Event};
use pitwall_db::models::user::{CreateUser, User};
use pitwall_db::models::vehicle::{CreateVehicle, Vehicle};
use pitwall_db::repositories::{DriverRepo, EventRepo, UserRepo, VehicleRepo};
use pitwall_weather::{WeatherClient, WeatherConfig};

pub const TEST_JWT_SECRET: &str = "pitwall-test-secret";
pub const TEST_PASSWORD: &str = "longenough1";
pub const TEST_BUCKET: &str = "test-bucket";

/// Build a test `ServerConfig` with safe defaults and a signing secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: Some(TEST_JWT_SECRET.to_string()),
            expiry_hours: 1,
        },
        storage: StorageConfig {
            bucket: TEST_BUCKET.to_string(),
            ..StorageConfig::default()
        },
        // Nothing listens here; weather tests stop before any HTTP call.
        weather: WeatherConfig {
            geocoding_url: "http://127.0.0.1:9/v1/search".to_string(),
            forecast_url: "http://127.0.0.1:9/v1/forecast".to_string(),
        },
        bootstrap_admin: None,
    }
}

/// In-memory object store. Presigned URLs are fake but deterministic and
/// every delete is recorded.
#[derive(Default)]
pub struct MemoryStore {
    pub deleted: Mutex<Vec<String>>,
    pub fail_deletes: bool,
}

impl MemoryStore {
    pub fn failing_deletes() -> Self {
        Self {
            fail_deletes: true,
            ..Self::default()
        }
    }

    pub fn deleted_keys(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn presign_put(
        &self,
        key: &str,
        _content_type: &str,
        expires_in: Duration,
    ) -> Result<String, StorageError> {
        Ok(format!(
            "https://{TEST_BUCKET}.example.test/{key}?op=put&expires={}",
            expires_in.as_secs()
        ))
    }

    async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String, StorageError> {
        Ok(format!(
            "https://{TEST_BUCKET}.example.test/{key}?op=get&expires={}",
            expires_in.as_secs()
        ))
    }

    async fn delete_object(&self, key: &str) -> Result<(), StorageError> {
        if self.fail_deletes {
            return Err(StorageError::Delete {
                key: key.to_string(),
                message: "bucket unavailable".to_string(),
            });
        }
        self.deleted.lock().unwrap().push(key.to_string());
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        build_public_url(None, TEST_BUCKET, "us-east-1", key)
    }
}

/// Build the full application router with a fresh in-memory object store.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config(), Arc::new(MemoryStore::default()))
}

/// Build the router with a caller-supplied config and object store.
pub fn build_test_app_with(pool: PgPool, config: ServerConfig, store: Arc<MemoryStore>) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        storage: store,
        weather: Arc::new(WeatherClient::new(config.weather.clone())),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a user with [`TEST_PASSWORD`] directly in the database.
pub async fn create_user(pool: &PgPool, email: &str, role: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
            first_name: "Test".to_string(),
            last_name: role.to_string(),
            role: role.to_string(),
        },
    )
    .await
    .expect("user creation should succeed")
}

pub fn token_for(user: &User) -> String {
    generate_access_token(user.id, &user.email, &user.role, TEST_JWT_SECRET, 1).unwrap()
}

/// Create a user with `role` and return it together with a signed token.
pub async fn user_with_token(pool: &PgPool, role: &str) -> (User, String) {
    let email = format!("{role}-{}@team.test", uuid::Uuid::new_v4().simple());
    let user = create_user(pool, &email, role).await;
    let token = token_for(&user);
    (user, token)
}

pub async fn create_vehicle(pool: &PgPool, make: &str, model: &str) -> Vehicle {
    VehicleRepo::create(
        pool,
        &CreateVehicle {
            make: make.to_string(),
            model: model.to_string(),
            year: 2024,
            category: "GT3".to_string(),
            number: None,
            vin: None,
            notes: None,
        },
    )
    .await
    .expect("vehicle creation should succeed")
}

pub async fn create_event(pool: &PgPool, name: &str) -> Event {
    let start = chrono::DateTime::parse_from_rfc3339("2026-03-15T09:00:00Z")
        .unwrap()
        .with_timezone(&chrono::Utc);
    EventRepo::create(
        pool,
        &CreateEvent {
            name: name.to_string(),
            event_type: "Race".to_string(),
            venue: "Brands Hatch".to_string(),
            location: "Kent, UK".to_string(),
            start_date: start,
            end_date: start + chrono::Duration::hours(9),
            status: None,
            description: None,
            notes: None,
        },
    )
    .await
    .expect("event creation should succeed")
}

/// Create a driver profile for an existing user.
pub async fn create_driver(pool: &PgPool, user: &User) -> Driver {
    DriverRepo::create(
        pool,
        &CreateDriver {
            user_id: user.id,
            license_number: None,
            nationality: None,
            date_of_birth: None,
            bio: None,
            emergency_contact: None,
            medical_notes: None,
        },
    )
    .await
    .expect("driver creation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
