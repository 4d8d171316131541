use std::sync::Arc;

use pitwall_cloud::ObjectStore;
use pitwall_weather::WeatherClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: every field is a pool handle or behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub pool: pitwall_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Bucket that holds uploaded photos and documents.
    pub storage: Arc<dyn ObjectStore>,
    pub weather: Arc<WeatherClient>,
}
