//! Setup sheet model and request schemas.
//!
//! A setup sheet records how a car was configured for one session of an
//! event: tyres, suspension, aero, brakes, engine and differential.

use pitwall_core::setups::{check_downforce_level, check_session_type};
use pitwall_core::types::{DbId, Timestamp};
use pitwall_core::validation::rule_violation;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// A row from the `setup_sheets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupSheet {
    pub id: DbId,
    pub vehicle_id: DbId,
    pub event_id: DbId,
    pub created_by_id: DbId,
    pub session_type: String,
    pub session_number: Option<i32>,

    pub tyre_front_left: Option<String>,
    pub tyre_front_right: Option<String>,
    pub tyre_rear_left: Option<String>,
    pub tyre_rear_right: Option<String>,
    #[serde(rename = "tyrePressureFL")]
    pub tyre_pressure_fl: Option<f64>,
    #[serde(rename = "tyrePressureFR")]
    pub tyre_pressure_fr: Option<f64>,
    #[serde(rename = "tyrePressureRL")]
    pub tyre_pressure_rl: Option<f64>,
    #[serde(rename = "tyrePressureRR")]
    pub tyre_pressure_rr: Option<f64>,

    pub ride_height_front: Option<f64>,
    pub ride_height_rear: Option<f64>,
    pub spring_rate_front: Option<f64>,
    pub spring_rate_rear: Option<f64>,
    pub damper_front: Option<String>,
    pub damper_rear: Option<String>,
    pub camber_front: Option<f64>,
    pub camber_rear: Option<f64>,
    pub toe_in_front: Option<f64>,
    pub toe_in_rear: Option<f64>,

    pub front_wing_angle: Option<f64>,
    pub rear_wing_angle: Option<f64>,
    pub downforce_level: Option<String>,

    pub brake_bias: Option<f64>,
    pub brake_compound: Option<String>,

    pub engine_map: Option<String>,
    pub differential_entry: Option<f64>,
    pub differential_mid: Option<f64>,
    pub differential_exit: Option<f64>,

    pub fuel_load: Option<f64>,
    pub notes: Option<String>,
    pub driver_feedback: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body of `POST /api/setups`. The creator is taken from the token.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[validate(schema(function = "validate_create_setup"))]
pub struct CreateSetupSheet {
    pub vehicle_id: DbId,
    pub event_id: DbId,
    pub session_type: String,
    #[validate(range(min = 1, message = "sessionNumber must be a positive integer"))]
    pub session_number: Option<i32>,

    pub tyre_front_left: Option<String>,
    pub tyre_front_right: Option<String>,
    pub tyre_rear_left: Option<String>,
    pub tyre_rear_right: Option<String>,
    #[serde(rename = "tyrePressureFL")]
    pub tyre_pressure_fl: Option<f64>,
    #[serde(rename = "tyrePressureFR")]
    pub tyre_pressure_fr: Option<f64>,
    #[serde(rename = "tyrePressureRL")]
    pub tyre_pressure_rl: Option<f64>,
    #[serde(rename = "tyrePressureRR")]
    pub tyre_pressure_rr: Option<f64>,

    pub ride_height_front: Option<f64>,
    pub ride_height_rear: Option<f64>,
    pub spring_rate_front: Option<f64>,
    pub spring_rate_rear: Option<f64>,
    pub damper_front: Option<String>,
    pub damper_rear: Option<String>,
    pub camber_front: Option<f64>,
    pub camber_rear: Option<f64>,
    pub toe_in_front: Option<f64>,
    pub toe_in_rear: Option<f64>,

    pub front_wing_angle: Option<f64>,
    pub rear_wing_angle: Option<f64>,
    pub downforce_level: Option<String>,

    pub brake_bias: Option<f64>,
    pub brake_compound: Option<String>,

    pub engine_map: Option<String>,
    pub differential_entry: Option<f64>,
    pub differential_mid: Option<f64>,
    pub differential_exit: Option<f64>,

    pub fuel_load: Option<f64>,
    pub notes: Option<String>,
    pub driver_feedback: Option<String>,
}

fn validate_create_setup(input: &CreateSetupSheet) -> Result<(), ValidationError> {
    check_session_type(&input.session_type).map_err(rule_violation)?;
    check_downforce_level(input.downforce_level.as_deref()).map_err(rule_violation)
}

/// Body of `PUT /api/setups/{id}`. All fields are optional; the creator
/// cannot be reassigned.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[validate(schema(function = "validate_update_setup"))]
pub struct UpdateSetupSheet {
    pub vehicle_id: Option<DbId>,
    pub event_id: Option<DbId>,
    pub session_type: Option<String>,
    #[validate(range(min = 1, message = "sessionNumber must be a positive integer"))]
    pub session_number: Option<i32>,

    pub tyre_front_left: Option<String>,
    pub tyre_front_right: Option<String>,
    pub tyre_rear_left: Option<String>,
    pub tyre_rear_right: Option<String>,
    #[serde(rename = "tyrePressureFL")]
    pub tyre_pressure_fl: Option<f64>,
    #[serde(rename = "tyrePressureFR")]
    pub tyre_pressure_fr: Option<f64>,
    #[serde(rename = "tyrePressureRL")]
    pub tyre_pressure_rl: Option<f64>,
    #[serde(rename = "tyrePressureRR")]
    pub tyre_pressure_rr: Option<f64>,

    pub ride_height_front: Option<f64>,
    pub ride_height_rear: Option<f64>,
    pub spring_rate_front: Option<f64>,
    pub spring_rate_rear: Option<f64>,
    pub damper_front: Option<String>,
    pub damper_rear: Option<String>,
    pub camber_front: Option<f64>,
    pub camber_rear: Option<f64>,
    pub toe_in_front: Option<f64>,
    pub toe_in_rear: Option<f64>,

    pub front_wing_angle: Option<f64>,
    pub rear_wing_angle: Option<f64>,
    pub downforce_level: Option<String>,

    pub brake_bias: Option<f64>,
    pub brake_compound: Option<String>,

    pub engine_map: Option<String>,
    pub differential_entry: Option<f64>,
    pub differential_mid: Option<f64>,
    pub differential_exit: Option<f64>,

    pub fuel_load: Option<f64>,
    pub notes: Option<String>,
    pub driver_feedback: Option<String>,
}

fn validate_update_setup(input: &UpdateSetupSheet) -> Result<(), ValidationError> {
    if let Some(session_type) = &input.session_type {
        check_session_type(session_type).map_err(rule_violation)?;
    }
    check_downforce_level(input.downforce_level.as_deref()).map_err(rule_violation)
}

/// Query string of `GET /api/setups`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupSheetFilter {
    pub event_id: Option<DbId>,
    pub vehicle_id: Option<DbId>,
}
