//! Vehicle entity model and request schemas.

use pitwall_core::types::{DbId, Timestamp};
use pitwall_core::validation::rule_violation;
use pitwall_core::vehicles::check_year;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// A row from the `vehicles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: DbId,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub category: String,
    pub number: Option<String>,
    pub vin: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body of `POST /api/vehicles`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[validate(schema(function = "validate_create_vehicle"))]
pub struct CreateVehicle {
    #[validate(length(min = 1, message = "make is required"))]
    pub make: String,
    #[validate(length(min = 1, message = "model is required"))]
    pub model: String,
    pub year: i32,
    #[validate(length(min = 1, message = "category is required"))]
    pub category: String,
    pub number: Option<String>,
    pub vin: Option<String>,
    pub notes: Option<String>,
}

fn validate_create_vehicle(input: &CreateVehicle) -> Result<(), ValidationError> {
    check_year(input.year).map_err(rule_violation)
}

/// Body of `PUT /api/vehicles/{id}`. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[validate(schema(function = "validate_update_vehicle"))]
pub struct UpdateVehicle {
    #[validate(length(min = 1, message = "make cannot be empty"))]
    pub make: Option<String>,
    #[validate(length(min = 1, message = "model cannot be empty"))]
    pub model: Option<String>,
    pub year: Option<i32>,
    #[validate(length(min = 1, message = "category cannot be empty"))]
    pub category: Option<String>,
    pub number: Option<String>,
    pub vin: Option<String>,
    pub notes: Option<String>,
}

fn validate_update_vehicle(input: &UpdateVehicle) -> Result<(), ValidationError> {
    match input.year {
        Some(year) => check_year(year).map_err(rule_violation),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_unknown_fields() {
        let body = json!({"make": "Radical", "model": "SR3", "year": 2024, "category": "Prototype", "colour": "red"});
        assert!(serde_json::from_value::<CreateVehicle>(body).is_err());
    }

    #[test]
    fn rejects_out_of_range_year() {
        let input: CreateVehicle = serde_json::from_value(
            json!({"make": "Ford", "model": "T", "year": 1899, "category": "Vintage"}),
        )
        .unwrap();
        assert!(input.validate().is_err());
    }

    #[test]
    fn accepts_minimal_vehicle() {
        let input: CreateVehicle = serde_json::from_value(
            json!({"make": "Radical", "model": "SR3", "year": 2024, "category": "Prototype"}),
        )
        .unwrap();
        assert!(input.validate().is_ok());
    }
}
