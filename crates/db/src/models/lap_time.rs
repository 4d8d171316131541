//! Lap time model and request schemas.

use pitwall_core::analytics::{driver_display_name, vehicle_display_name, LapSample};
use pitwall_core::lap_times::{check_session_type, format_lap_time, format_sector};
use pitwall_core::types::{DbId, Timestamp};
use pitwall_core::validation::rule_violation;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// A row from the `lap_times` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LapTime {
    pub id: DbId,
    pub driver_id: DbId,
    pub vehicle_id: DbId,
    pub event_id: DbId,
    pub session_type: String,
    pub lap_number: i32,
    pub lap_time_ms: i32,
    pub sector1_ms: Option<i32>,
    pub sector2_ms: Option<i32>,
    pub sector3_ms: Option<i32>,
    pub is_valid: bool,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A lap joined with the names of its driver, vehicle and event.
#[derive(Debug, Clone, FromRow)]
pub struct LapTimeDetail {
    #[sqlx(flatten)]
    pub lap: LapTime,
    pub driver_first_name: String,
    pub driver_last_name: String,
    pub vehicle_year: i32,
    pub vehicle_make: String,
    pub vehicle_model: String,
    pub event_name: String,
}

impl LapTimeDetail {
    pub fn driver_name(&self) -> String {
        driver_display_name(&self.driver_first_name, &self.driver_last_name)
    }

    pub fn vehicle_name(&self) -> String {
        vehicle_display_name(self.vehicle_year, &self.vehicle_make, &self.vehicle_model)
    }

    pub fn to_sample(&self) -> LapSample {
        LapSample {
            driver_id: self.lap.driver_id,
            driver_name: self.driver_name(),
            vehicle_id: self.lap.vehicle_id,
            vehicle_name: self.vehicle_name(),
            event_name: self.event_name.clone(),
            lap_number: self.lap.lap_number,
            lap_time_ms: i64::from(self.lap.lap_time_ms),
        }
    }
}

/// API shape of a lap: the row plus display names and formatted times.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LapTimeResponse {
    #[serde(flatten)]
    pub lap: LapTime,
    pub lap_time_formatted: String,
    pub sector1_formatted: Option<String>,
    pub sector2_formatted: Option<String>,
    pub sector3_formatted: Option<String>,
    pub driver_name: String,
    pub vehicle_name: String,
    pub event_name: String,
}

impl From<LapTimeDetail> for LapTimeResponse {
    fn from(detail: LapTimeDetail) -> Self {
        let driver_name = detail.driver_name();
        let vehicle_name = detail.vehicle_name();
        let lap = detail.lap;
        Self {
            lap_time_formatted: format_lap_time(i64::from(lap.lap_time_ms)),
            sector1_formatted: format_sector(lap.sector1_ms.map(i64::from)),
            sector2_formatted: format_sector(lap.sector2_ms.map(i64::from)),
            sector3_formatted: format_sector(lap.sector3_ms.map(i64::from)),
            driver_name,
            vehicle_name,
            event_name: detail.event_name,
            lap,
        }
    }
}

/// Body of `POST /api/analytics/laptimes`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[validate(schema(function = "validate_create_lap"))]
pub struct CreateLapTime {
    pub driver_id: DbId,
    pub vehicle_id: DbId,
    pub event_id: DbId,
    pub session_type: String,
    #[validate(range(min = 1, message = "lapNumber must be a positive integer"))]
    pub lap_number: i32,
    #[validate(range(min = 1, message = "lapTimeMs must be a positive integer (milliseconds)"))]
    pub lap_time_ms: i32,
    #[validate(range(min = 0, message = "sector1Ms must be 0 or greater"))]
    pub sector1_ms: Option<i32>,
    #[validate(range(min = 0, message = "sector2Ms must be 0 or greater"))]
    pub sector2_ms: Option<i32>,
    #[validate(range(min = 0, message = "sector3Ms must be 0 or greater"))]
    pub sector3_ms: Option<i32>,
    /// Defaults to `true` if omitted.
    pub is_valid: Option<bool>,
    pub notes: Option<String>,
}

fn validate_create_lap(input: &CreateLapTime) -> Result<(), ValidationError> {
    check_session_type(&input.session_type).map_err(rule_violation)
}

/// Body of `PUT /api/analytics/laptimes/{id}`. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[validate(schema(function = "validate_update_lap"))]
pub struct UpdateLapTime {
    pub driver_id: Option<DbId>,
    pub vehicle_id: Option<DbId>,
    pub event_id: Option<DbId>,
    pub session_type: Option<String>,
    #[validate(range(min = 1, message = "lapNumber must be a positive integer"))]
    pub lap_number: Option<i32>,
    #[validate(range(min = 1, message = "lapTimeMs must be a positive integer (milliseconds)"))]
    pub lap_time_ms: Option<i32>,
    #[validate(range(min = 0, message = "sector1Ms must be 0 or greater"))]
    pub sector1_ms: Option<i32>,
    #[validate(range(min = 0, message = "sector2Ms must be 0 or greater"))]
    pub sector2_ms: Option<i32>,
    #[validate(range(min = 0, message = "sector3Ms must be 0 or greater"))]
    pub sector3_ms: Option<i32>,
    pub is_valid: Option<bool>,
    pub notes: Option<String>,
}

fn validate_update_lap(input: &UpdateLapTime) -> Result<(), ValidationError> {
    match &input.session_type {
        Some(session_type) => check_session_type(session_type).map_err(rule_violation),
        None => Ok(()),
    }
}

/// Query string of `GET /api/analytics/laptimes`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LapTimeFilter {
    pub event_id: Option<DbId>,
    pub driver_id: Option<DbId>,
    pub vehicle_id: Option<DbId>,
    pub session_type: Option<String>,
}
