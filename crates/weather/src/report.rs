//! Shapes a raw [`Forecast`] into the event weather payload.

use pitwall_core::types::{DbId, Timestamp};
use serde::Serialize;

use crate::client::{Coordinates, Forecast};
use crate::codes::{self, WeatherSummary};

/// The event fields a weather report needs.
#[derive(Debug, Clone)]
pub struct WeatherEvent {
    pub id: DbId,
    pub name: String,
    pub venue: String,
    pub location: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentWeather {
    pub temperature: f64,
    pub apparent_temperature: f64,
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub wind_gusts: f64,
    pub precipitation: f64,
    pub cloud_cover: f64,
    pub relative_humidity: f64,
    pub visibility: f64,
    pub weather_code: i32,
    #[serde(flatten)]
    pub summary: WeatherSummary,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyWeather {
    pub time: String,
    pub temperature: f64,
    pub apparent_temperature: f64,
    pub precipitation_probability: f64,
    pub precipitation: f64,
    pub wind_speed: f64,
    pub wind_direction: f64,
    pub wind_gusts: f64,
    pub weather_code: i32,
    pub cloud_cover: f64,
    pub relative_humidity: f64,
    pub visibility: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyWeather {
    pub date: String,
    pub temperature_max: f64,
    pub temperature_min: f64,
    pub precipitation_sum: f64,
    pub precipitation_probability_max: f64,
    pub wind_speed_max: f64,
    pub wind_gusts_max: f64,
    pub wind_direction_dominant: f64,
    pub weather_code: i32,
    #[serde(flatten)]
    pub summary: WeatherSummary,
    pub sunrise: String,
    pub sunset: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherUnits {
    pub temperature: &'static str,
    pub wind_speed: &'static str,
    pub precipitation: &'static str,
    pub visibility: &'static str,
}

pub const IMPERIAL_UNITS: WeatherUnits = WeatherUnits {
    temperature: "°F",
    wind_speed: "mph",
    precipitation: "in",
    visibility: "m",
};

/// Payload of `GET /api/events/{id}/weather`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventWeather {
    pub event_id: DbId,
    pub event_name: String,
    pub venue: String,
    pub location: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub coordinates: Coordinates,
    pub current: CurrentWeather,
    pub daily: Vec<DailyWeather>,
    pub hourly: Vec<HourlyWeather>,
    pub units: WeatherUnits,
    pub fetched_at: Timestamp,
}

fn at(series: &[Option<f64>], i: usize) -> f64 {
    series.get(i).copied().flatten().unwrap_or(0.0)
}

fn code_at(series: &[Option<i32>], i: usize) -> i32 {
    series.get(i).copied().flatten().unwrap_or(0)
}

fn text_at(series: &[Option<String>], i: usize) -> String {
    series.get(i).cloned().flatten().unwrap_or_default()
}

/// Align the column-oriented forecast into per-hour and per-day rows.
///
/// Missing samples become `0` (or an empty string for sunrise and sunset).
/// The current weather code is looked up in the WMO table; daily rows carry
/// their own summary as well.
pub fn build_report(
    event: WeatherEvent,
    coordinates: Coordinates,
    forecast: Forecast,
    fetched_at: Timestamp,
) -> EventWeather {
    let c = &forecast.current;
    let current_code = c.weather_code.unwrap_or(0);
    let current = CurrentWeather {
        temperature: c.temperature_2m.unwrap_or(0.0),
        apparent_temperature: c.apparent_temperature.unwrap_or(0.0),
        wind_speed: c.wind_speed_10m.unwrap_or(0.0),
        wind_direction: c.wind_direction_10m.unwrap_or(0.0),
        wind_gusts: c.wind_gusts_10m.unwrap_or(0.0),
        precipitation: c.precipitation.unwrap_or(0.0),
        cloud_cover: c.cloud_cover.unwrap_or(0.0),
        relative_humidity: c.relative_humidity_2m.unwrap_or(0.0),
        visibility: c.visibility.unwrap_or(0.0),
        weather_code: current_code,
        summary: c.weather_code.map(codes::describe).unwrap_or(codes::UNKNOWN),
    };

    let h = &forecast.hourly;
    let hourly = h
        .time
        .iter()
        .enumerate()
        .map(|(i, time)| HourlyWeather {
            time: time.clone(),
            temperature: at(&h.temperature_2m, i),
            apparent_temperature: at(&h.apparent_temperature, i),
            precipitation_probability: at(&h.precipitation_probability, i),
            precipitation: at(&h.precipitation, i),
            wind_speed: at(&h.wind_speed_10m, i),
            wind_direction: at(&h.wind_direction_10m, i),
            wind_gusts: at(&h.wind_gusts_10m, i),
            weather_code: code_at(&h.weather_code, i),
            cloud_cover: at(&h.cloud_cover, i),
            relative_humidity: at(&h.relative_humidity_2m, i),
            visibility: at(&h.visibility, i),
        })
        .collect();

    let d = &forecast.daily;
    let daily = d
        .time
        .iter()
        .enumerate()
        .map(|(i, date)| {
            let code = code_at(&d.weather_code, i);
            DailyWeather {
                date: date.clone(),
                temperature_max: at(&d.temperature_2m_max, i),
                temperature_min: at(&d.temperature_2m_min, i),
                precipitation_sum: at(&d.precipitation_sum, i),
                precipitation_probability_max: at(&d.precipitation_probability_max, i),
                wind_speed_max: at(&d.wind_speed_10m_max, i),
                wind_gusts_max: at(&d.wind_gusts_10m_max, i),
                wind_direction_dominant: at(&d.wind_direction_10m_dominant, i),
                weather_code: code,
                summary: codes::describe(code),
                sunrise: text_at(&d.sunrise, i),
                sunset: text_at(&d.sunset, i),
            }
        })
        .collect();

    EventWeather {
        event_id: event.id,
        event_name: event.name,
        venue: event.venue,
        location: event.location,
        start_date: event.start_date,
        end_date: event.end_date,
        coordinates,
        current,
        daily,
        hourly,
        units: IMPERIAL_UNITS,
        fetched_at,
    }
}
