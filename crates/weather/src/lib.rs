//! Event weather forecasts from the Open-Meteo geocoding and forecast APIs.
//!
//! Neither API needs a key. [`WeatherClient`] performs the two HTTP calls and
//! [`report::build_report`] shapes the raw forecast into the payload served
//! by `GET /api/events/{id}/weather`.

pub mod client;
pub mod codes;
pub mod report;

pub use client::{Coordinates, WeatherClient, WeatherConfig, WeatherError};
pub use report::{build_report, EventWeather, WeatherEvent};
