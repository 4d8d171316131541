//! WMO weather interpretation codes as reported by Open-Meteo.

use serde::Serialize;

/// Human-readable summary of a WMO code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeatherSummary {
    pub condition: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

const fn summary(
    condition: &'static str,
    description: &'static str,
    icon: &'static str,
) -> WeatherSummary {
    WeatherSummary {
        condition,
        description,
        icon,
    }
}

pub const UNKNOWN: WeatherSummary = summary("Unknown", "Unknown conditions", "❓");

const WMO_CODES: &[(i32, WeatherSummary)] = &[
    (0, summary("Clear Sky", "Clear sky", "☀️")),
    (1, summary("Mainly Clear", "Mainly clear", "🌤️")),
    (2, summary("Partly Cloudy", "Partly cloudy", "⛅")),
    (3, summary("Overcast", "Overcast", "☁️")),
    (45, summary("Foggy", "Fog", "🌫️")),
    (48, summary("Icy Fog", "Depositing rime fog", "🌫️")),
    (51, summary("Light Drizzle", "Light drizzle", "🌦️")),
    (53, summary("Drizzle", "Moderate drizzle", "🌦️")),
    (55, summary("Heavy Drizzle", "Dense drizzle", "🌧️")),
    (61, summary("Light Rain", "Slight rain", "🌧️")),
    (63, summary("Rain", "Moderate rain", "🌧️")),
    (65, summary("Heavy Rain", "Heavy rain", "🌧️")),
    (71, summary("Light Snow", "Slight snowfall", "🌨️")),
    (73, summary("Snow", "Moderate snowfall", "❄️")),
    (75, summary("Heavy Snow", "Heavy snowfall", "❄️")),
    (77, summary("Snow Grains", "Snow grains", "🌨️")),
    (80, summary("Light Showers", "Slight rain showers", "🌦️")),
    (81, summary("Showers", "Moderate rain showers", "🌧️")),
    (82, summary("Heavy Showers", "Violent rain showers", "⛈️")),
    (85, summary("Snow Showers", "Slight snow showers", "🌨️")),
    (86, summary("Heavy Snow Showers", "Heavy snow showers", "❄️")),
    (95, summary("Thunderstorm", "Thunderstorm", "⛈️")),
    (96, summary("Thunderstorm + Hail", "Thunderstorm with slight hail", "⛈️")),
    (99, summary("Thunderstorm + Hail", "Thunderstorm with heavy hail", "⛈️")),
];

/// Look up a WMO code, falling back to [`UNKNOWN`].
pub fn describe(code: i32) -> WeatherSummary {
    WMO_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, s)| *s)
        .unwrap_or(UNKNOWN)
}
