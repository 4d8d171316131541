//! HTTP client for the Open-Meteo geocoding and forecast endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Days of forecast Open-Meteo can serve.
pub const FORECAST_DAYS: u8 = 16;

const CURRENT_VARIABLES: &[&str] = &[
    "temperature_2m",
    "apparent_temperature",
    "precipitation",
    "wind_speed_10m",
    "wind_direction_10m",
    "wind_gusts_10m",
    "cloud_cover",
    "relative_humidity_2m",
    "visibility",
    "weather_code",
];

const HOURLY_VARIABLES: &[&str] = &[
    "temperature_2m",
    "apparent_temperature",
    "precipitation_probability",
    "precipitation",
    "wind_speed_10m",
    "wind_direction_10m",
    "wind_gusts_10m",
    "weather_code",
    "cloud_cover",
    "relative_humidity_2m",
    "visibility",
];

const DAILY_VARIABLES: &[&str] = &[
    "temperature_2m_max",
    "temperature_2m_min",
    "precipitation_sum",
    "precipitation_probability_max",
    "wind_speed_10m_max",
    "wind_gusts_10m_max",
    "wind_direction_10m_dominant",
    "weather_code",
    "sunrise",
    "sunset",
];

/// Endpoints used by [`WeatherClient`].
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    pub geocoding_url: String,
    pub forecast_url: String,
}

impl WeatherConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var             | Default                                          |
    /// |---------------------|--------------------------------------------------|
    /// | `GEOCODING_API_URL` | `https://geocoding-api.open-meteo.com/v1/search` |
    /// | `FORECAST_API_URL`  | `https://api.open-meteo.com/v1/forecast`         |
    pub fn from_env() -> Self {
        Self {
            geocoding_url: std::env::var("GEOCODING_API_URL")
                .unwrap_or_else(|_| DEFAULT_GEOCODING_URL.into()),
            forecast_url: std::env::var("FORECAST_API_URL")
                .unwrap_or_else(|_| DEFAULT_FORECAST_URL.into()),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            geocoding_url: DEFAULT_GEOCODING_URL.into(),
            forecast_url: DEFAULT_FORECAST_URL.into(),
        }
    }
}

/// Errors from the weather API layer.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Open-Meteo returned a non-2xx status code.
    #[error("Weather API error ({status}): {body}")]
    ApiError { status: u16, body: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Vec<Coordinates>,
}

/// Raw forecast body. Open-Meteo may emit `null` for any sample it cannot
/// provide, so every value is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Forecast {
    pub current: CurrentSample,
    pub hourly: HourlySeries,
    pub daily: DailySeries,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CurrentSample {
    pub time: Option<String>,
    pub temperature_2m: Option<f64>,
    pub apparent_temperature: Option<f64>,
    pub precipitation: Option<f64>,
    pub wind_speed_10m: Option<f64>,
    pub wind_direction_10m: Option<f64>,
    pub wind_gusts_10m: Option<f64>,
    pub cloud_cover: Option<f64>,
    pub relative_humidity_2m: Option<f64>,
    pub visibility: Option<f64>,
    pub weather_code: Option<i32>,
}

/// Column-oriented hourly data; index `i` of every vector is the same hour.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HourlySeries {
    pub time: Vec<String>,
    pub temperature_2m: Vec<Option<f64>>,
    pub apparent_temperature: Vec<Option<f64>>,
    pub precipitation_probability: Vec<Option<f64>>,
    pub precipitation: Vec<Option<f64>>,
    pub wind_speed_10m: Vec<Option<f64>>,
    pub wind_direction_10m: Vec<Option<f64>>,
    pub wind_gusts_10m: Vec<Option<f64>>,
    pub weather_code: Vec<Option<i32>>,
    pub cloud_cover: Vec<Option<f64>>,
    pub relative_humidity_2m: Vec<Option<f64>>,
    pub visibility: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DailySeries {
    pub time: Vec<String>,
    pub temperature_2m_max: Vec<Option<f64>>,
    pub temperature_2m_min: Vec<Option<f64>>,
    pub precipitation_sum: Vec<Option<f64>>,
    pub precipitation_probability_max: Vec<Option<f64>>,
    pub wind_speed_10m_max: Vec<Option<f64>>,
    pub wind_gusts_10m_max: Vec<Option<f64>>,
    pub wind_direction_10m_dominant: Vec<Option<f64>>,
    pub weather_code: Vec<Option<i32>>,
    pub sunrise: Vec<Option<String>>,
    pub sunset: Vec<Option<String>>,
}

/// HTTP client for Open-Meteo.
pub struct WeatherClient {
    client: reqwest::Client,
    config: WeatherConfig,
}

impl WeatherClient {
    pub fn new(config: WeatherConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Resolve a free-text place name to coordinates.
    ///
    /// Returns `Ok(None)` when the geocoder has no match.
    pub async fn geocode(&self, name: &str) -> Result<Option<Coordinates>, WeatherError> {
        let response = self
            .client
            .get(&self.config.geocoding_url)
            .query(&[
                ("name", name),
                ("count", "1"),
                ("language", "en"),
                ("format", "json"),
            ])
            .send()
            .await?;

        let body: GeocodingResponse = Self::parse_response(response).await?;
        Ok(body.results.into_iter().next())
    }

    /// Geocode `"<venue>, <location>"`, then `location` alone.
    pub async fn locate(
        &self,
        venue: &str,
        location: &str,
    ) -> Result<Option<Coordinates>, WeatherError> {
        if let Some(found) = self.geocode(&format!("{venue}, {location}")).await? {
            return Ok(Some(found));
        }
        tracing::debug!(venue, location, "Venue not found by geocoder, retrying with location only");
        self.geocode(location).await
    }

    /// Fetch current conditions plus hourly and daily series for a date range.
    pub async fn forecast(
        &self,
        at: Coordinates,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Forecast, WeatherError> {
        let response = self
            .client
            .get(&self.config.forecast_url)
            .query(&forecast_query(at, start, end))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, WeatherError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WeatherError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }
}

/// Query string for the forecast endpoint: imperial units, local timezone.
pub fn forecast_query(at: Coordinates, start: NaiveDate, end: NaiveDate) -> Vec<(&'static str, String)> {
    vec![
        ("latitude", at.latitude.to_string()),
        ("longitude", at.longitude.to_string()),
        ("current", CURRENT_VARIABLES.join(",")),
        ("hourly", HOURLY_VARIABLES.join(",")),
        ("daily", DAILY_VARIABLES.join(",")),
        ("temperature_unit", "fahrenheit".into()),
        ("wind_speed_unit", "mph".into()),
        ("precipitation_unit", "inch".into()),
        ("timezone", "auto".into()),
        ("start_date", start.format("%Y-%m-%d").to_string()),
        ("end_date", end.format("%Y-%m-%d").to_string()),
        ("forecast_days", FORECAST_DAYS.to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param<'a>(query: &'a [(&'static str, String)], key: &str) -> &'a str {
        query
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
            .unwrap()
    }

    #[test]
    fn forecast_query_uses_imperial_units_and_event_dates() {
        let query = forecast_query(
            Coordinates {
                latitude: 51.36,
                longitude: 0.26,
            },
            NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 16).unwrap(),
        );

        assert_eq!(param(&query, "latitude"), "51.36");
        assert_eq!(param(&query, "temperature_unit"), "fahrenheit");
        assert_eq!(param(&query, "wind_speed_unit"), "mph");
        assert_eq!(param(&query, "precipitation_unit"), "inch");
        assert_eq!(param(&query, "timezone"), "auto");
        assert_eq!(param(&query, "start_date"), "2026-03-15");
        assert_eq!(param(&query, "end_date"), "2026-03-16");
        assert_eq!(param(&query, "forecast_days"), "16");
        assert!(param(&query, "daily").contains("sunrise"));
    }

    #[test]
    fn forecast_tolerates_nulls_and_missing_blocks() {
        let body = serde_json::json!({
            "current": { "temperature_2m": 55.2, "weather_code": null },
            "hourly": { "time": ["2026-03-15T00:00"], "temperature_2m": [null] }
        });
        let forecast: Forecast = serde_json::from_value(body).unwrap();
        assert_eq!(forecast.current.temperature_2m, Some(55.2));
        assert_eq!(forecast.current.weather_code, None);
        assert_eq!(forecast.hourly.temperature_2m, vec![None]);
        assert!(forecast.daily.time.is_empty());
    }

    #[test]
    fn geocoding_without_results_is_empty() {
        let body: GeocodingResponse = serde_json::from_str(r#"{"generationtime_ms":0.5}"#).unwrap();
        assert!(body.results.is_empty());

        let body: GeocodingResponse = serde_json::from_str(
            r#"{"results":[{"id":1,"name":"Kent","latitude":51.2,"longitude":0.7,"country":"UK"}]}"#,
        )
        .unwrap();
        assert_eq!(body.results[0].latitude, 51.2);
    }
}
