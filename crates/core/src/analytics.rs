//! Lap analytics aggregation.
//!
//! Input is the set of valid laps in scope (optionally one event). Three
//! independent passes produce the driver leaderboard, the vehicle
//! leaderboard and per-driver lap trends.

use indexmap::IndexMap;
use serde::Serialize;

use crate::lap_times::format_lap_time;
use crate::types::DbId;

/// One lap with the display names the summary needs.
#[derive(Debug, Clone)]
pub struct LapSample {
    pub driver_id: DbId,
    pub driver_name: String,
    pub vehicle_id: DbId,
    pub vehicle_name: String,
    pub event_name: String,
    pub lap_number: i32,
    pub lap_time_ms: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BestLapByDriver {
    pub driver_name: String,
    pub lap_time_ms: i64,
    pub lap_time_formatted: String,
    pub vehicle_name: String,
    pub event_name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BestLapByVehicle {
    pub vehicle_name: String,
    pub lap_time_ms: i64,
    pub lap_time_formatted: String,
    pub driver_name: String,
    pub event_name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LapTrendPoint {
    pub lap_number: i32,
    pub lap_time_ms: i64,
    pub lap_time_formatted: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverLapTrend {
    pub driver_name: String,
    pub laps: Vec<LapTrendPoint>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LapSummary {
    pub total_laps: usize,
    pub best_laps_by_driver: Vec<BestLapByDriver>,
    pub best_laps_by_vehicle: Vec<BestLapByVehicle>,
    pub lap_trends_by_driver: Vec<DriverLapTrend>,
}

/// `"<year> <make> <model>"`, the label used everywhere a vehicle is named.
pub fn vehicle_display_name(year: i32, make: &str, model: &str) -> String {
    format!("{year} {make} {model}")
}

pub fn driver_display_name(first_name: &str, last_name: &str) -> String {
    format!("{first_name} {last_name}")
}

/// Build the analytics summary. Leaderboards are ordered fastest first;
/// on equal times the lap seen first keeps the spot.
pub fn summarize_laps(samples: &[LapSample]) -> LapSummary {
    LapSummary {
        total_laps: samples.len(),
        best_laps_by_driver: best_by_driver(samples),
        best_laps_by_vehicle: best_by_vehicle(samples),
        lap_trends_by_driver: trends_by_driver(samples),
    }
}

fn fastest_per<'a, K, F>(samples: &'a [LapSample], key: F) -> Vec<&'a LapSample>
where
    K: std::hash::Hash + Eq,
    F: Fn(&LapSample) -> K,
{
    let mut best: IndexMap<K, &LapSample> = IndexMap::new();
    for sample in samples {
        best.entry(key(sample))
            .and_modify(|current| {
                if sample.lap_time_ms < current.lap_time_ms {
                    *current = sample;
                }
            })
            .or_insert(sample);
    }
    let mut fastest: Vec<&LapSample> = best.into_values().collect();
    fastest.sort_by_key(|s| s.lap_time_ms);
    fastest
}

fn best_by_driver(samples: &[LapSample]) -> Vec<BestLapByDriver> {
    fastest_per(samples, |s| s.driver_id)
        .into_iter()
        .map(|s| BestLapByDriver {
            driver_name: s.driver_name.clone(),
            lap_time_ms: s.lap_time_ms,
            lap_time_formatted: format_lap_time(s.lap_time_ms),
            vehicle_name: s.vehicle_name.clone(),
            event_name: s.event_name.clone(),
        })
        .collect()
}

fn best_by_vehicle(samples: &[LapSample]) -> Vec<BestLapByVehicle> {
    fastest_per(samples, |s| s.vehicle_id)
        .into_iter()
        .map(|s| BestLapByVehicle {
            vehicle_name: s.vehicle_name.clone(),
            lap_time_ms: s.lap_time_ms,
            lap_time_formatted: format_lap_time(s.lap_time_ms),
            driver_name: s.driver_name.clone(),
            event_name: s.event_name.clone(),
        })
        .collect()
}

fn trends_by_driver(samples: &[LapSample]) -> Vec<DriverLapTrend> {
    let mut grouped: IndexMap<DbId, DriverLapTrend> = IndexMap::new();
    for sample in samples {
        grouped
            .entry(sample.driver_id)
            .or_insert_with(|| DriverLapTrend {
                driver_name: sample.driver_name.clone(),
                laps: Vec::new(),
            })
            .laps
            .push(LapTrendPoint {
                lap_number: sample.lap_number,
                lap_time_ms: sample.lap_time_ms,
                lap_time_formatted: format_lap_time(sample.lap_time_ms),
            });
    }

    grouped
        .into_values()
        .map(|mut trend| {
            trend.laps.sort_by_key(|p| p.lap_number);
            trend
        })
        .collect()
}
