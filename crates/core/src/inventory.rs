//! Parts inventory rules and the stock summary.

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;
use crate::validation::check_one_of;

pub const PART_CATEGORIES: &[&str] = &[
    "Engine",
    "Suspension",
    "Brakes",
    "Tyres",
    "Bodywork",
    "Drivetrain",
    "Fuel System",
    "Electrical",
    "Electronics",
    "Safety",
    "Consumables",
    "Tools",
    "Other",
];

pub const PART_UNITS: &[&str] = &["pcs", "sets", "pairs", "liters", "kg", "g", "m", "boxes"];

pub const DEFAULT_UNIT: &str = "pcs";
pub const DEFAULT_QUANTITY: i32 = 0;
pub const DEFAULT_LOW_STOCK_THRESHOLD: i32 = 2;

pub fn check_category(category: &str) -> Result<(), CoreError> {
    check_one_of("category", category, PART_CATEGORIES)
}

pub fn check_unit(unit: &str) -> Result<(), CoreError> {
    check_one_of("unit", unit, PART_UNITS)
}

/// Low stock includes the boundary: a part sitting exactly at its
/// threshold needs reordering.
pub fn is_low_stock(quantity: i32, threshold: i32) -> bool {
    quantity <= threshold
}

/// Apply a signed stock adjustment, refusing to go below zero.
pub fn apply_adjustment(current: i32, adjustment: i32) -> Result<i32, CoreError> {
    let next = i64::from(current) + i64::from(adjustment);
    if next < 0 {
        return Err(CoreError::Validation(format!(
            "Cannot reduce quantity below 0. Current: {current}, adjustment: {adjustment}"
        )));
    }
    i32::try_from(next)
        .map_err(|_| CoreError::Validation(format!("Quantity {next} is out of range")))
}

/// Signed rendering used in adjustment messages (`+3`, `-2`).
pub fn signed(adjustment: i32) -> String {
    if adjustment > 0 {
        format!("+{adjustment}")
    } else {
        adjustment.to_string()
    }
}

pub fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// The stock fields the summary reads from each part.
#[derive(Debug, Clone)]
pub struct StockLine {
    pub id: DbId,
    pub name: String,
    pub category: String,
    pub quantity: i32,
    pub low_stock_threshold: i32,
    pub unit: String,
    pub cost: Option<f64>,
}

impl StockLine {
    fn value(&self) -> f64 {
        self.cost.unwrap_or(0.0) * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockPart {
    pub id: DbId,
    pub name: String,
    pub category: String,
    pub quantity: i32,
    pub low_stock_threshold: i32,
    pub unit: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRollup {
    pub category: String,
    pub count: usize,
    pub total_items: i64,
    pub total_value: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub total_parts: usize,
    pub total_items: i64,
    pub total_value: f64,
    pub low_stock_count: usize,
    pub low_stock_parts: Vec<LowStockPart>,
    pub by_category: Vec<CategoryRollup>,
}

/// Single pass over the inventory. Categories appear in first-seen order.
pub fn summarize_inventory(parts: &[StockLine]) -> InventorySummary {
    let mut total_items: i64 = 0;
    let mut total_value = 0.0;
    let mut low_stock_parts = Vec::new();
    let mut by_category: IndexMap<&str, CategoryRollup> = IndexMap::new();

    for part in parts {
        let value = part.value();
        total_items += i64::from(part.quantity);
        total_value += value;

        if is_low_stock(part.quantity, part.low_stock_threshold) {
            low_stock_parts.push(LowStockPart {
                id: part.id,
                name: part.name.clone(),
                category: part.category.clone(),
                quantity: part.quantity,
                low_stock_threshold: part.low_stock_threshold,
                unit: part.unit.clone(),
            });
        }

        let rollup = by_category
            .entry(part.category.as_str())
            .or_insert_with(|| CategoryRollup {
                category: part.category.clone(),
                count: 0,
                total_items: 0,
                total_value: 0.0,
            });
        rollup.count += 1;
        rollup.total_items += i64::from(part.quantity);
        rollup.total_value += value;
    }

    let by_category = by_category
        .into_values()
        .map(|mut rollup| {
            rollup.total_value = round_currency(rollup.total_value);
            rollup
        })
        .collect();

    InventorySummary {
        total_parts: parts.len(),
        total_items,
        total_value: round_currency(total_value),
        low_stock_count: low_stock_parts.len(),
        low_stock_parts,
        by_category,
    }
}
