//! Inventory part model and request schemas.

use pitwall_core::inventory::{check_category, check_unit, is_low_stock, StockLine};
use pitwall_core::types::{DbId, Timestamp};
use pitwall_core::validation::rule_violation;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use super::deserialize_some;

/// A row from the `parts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub id: DbId,
    pub name: String,
    pub part_number: Option<String>,
    pub category: String,
    pub quantity: i32,
    pub unit: String,
    pub cost: Option<f64>,
    pub supplier: Option<String>,
    pub location: Option<String>,
    pub low_stock_threshold: i32,
    pub notes: Option<String>,
    pub vehicle_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Part {
    pub fn to_stock_line(&self) -> StockLine {
        StockLine {
            id: self.id,
            name: self.name.clone(),
            category: self.category.clone(),
            quantity: self.quantity,
            low_stock_threshold: self.low_stock_threshold,
            unit: self.unit.clone(),
            cost: self.cost,
        }
    }
}

/// API shape of a part: the row plus the derived low-stock flag.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartResponse {
    #[serde(flatten)]
    pub part: Part,
    pub is_low_stock: bool,
}

impl From<Part> for PartResponse {
    fn from(part: Part) -> Self {
        Self {
            is_low_stock: is_low_stock(part.quantity, part.low_stock_threshold),
            part,
        }
    }
}

/// Body of `POST /api/parts`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[validate(schema(function = "validate_create_part"))]
pub struct CreatePart {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub part_number: Option<String>,
    pub category: String,
    /// Defaults to 0.
    #[validate(range(min = 0, message = "quantity must be 0 or greater"))]
    pub quantity: Option<i32>,
    /// Defaults to `pcs`.
    pub unit: Option<String>,
    #[validate(range(min = 0.0, message = "cost must be 0 or greater"))]
    pub cost: Option<f64>,
    pub supplier: Option<String>,
    pub location: Option<String>,
    /// Defaults to 2.
    #[validate(range(min = 0, message = "lowStockThreshold must be 0 or greater"))]
    pub low_stock_threshold: Option<i32>,
    pub notes: Option<String>,
    pub vehicle_id: Option<DbId>,
}

fn validate_create_part(input: &CreatePart) -> Result<(), ValidationError> {
    check_category(&input.category).map_err(rule_violation)?;
    match &input.unit {
        Some(unit) => check_unit(unit).map_err(rule_violation),
        None => Ok(()),
    }
}

/// Body of `PUT /api/parts/{id}`. All fields are optional; sending
/// `"vehicleId": null` unlinks the part from its vehicle.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[validate(schema(function = "validate_update_part"))]
pub struct UpdatePart {
    #[validate(length(min = 1, message = "name cannot be empty"))]
    pub name: Option<String>,
    pub part_number: Option<String>,
    pub category: Option<String>,
    #[validate(range(min = 0, message = "quantity must be 0 or greater"))]
    pub quantity: Option<i32>,
    pub unit: Option<String>,
    #[validate(range(min = 0.0, message = "cost must be 0 or greater"))]
    pub cost: Option<f64>,
    pub supplier: Option<String>,
    pub location: Option<String>,
    #[validate(range(min = 0, message = "lowStockThreshold must be 0 or greater"))]
    pub low_stock_threshold: Option<i32>,
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub vehicle_id: Option<Option<DbId>>,
}

fn validate_update_part(input: &UpdatePart) -> Result<(), ValidationError> {
    if let Some(category) = &input.category {
        check_category(category).map_err(rule_violation)?;
    }
    match &input.unit {
        Some(unit) => check_unit(unit).map_err(rule_violation),
        None => Ok(()),
    }
}

/// Query string of `GET /api/parts`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartFilter {
    pub category: Option<String>,
    pub vehicle_id: Option<DbId>,
    /// `true` keeps only parts at or below their threshold.
    pub low_stock: Option<bool>,
    /// Case-insensitive match on name, part number, supplier or location.
    pub search: Option<String>,
}
