//! Vehicle field rules.

use chrono::{Datelike, Utc};

use crate::error::CoreError;

/// Oldest model year the registry accepts.
pub const MIN_VEHICLE_YEAR: i32 = 1900;

/// Newest accepted model year: next year's cars are announced early.
pub fn max_vehicle_year(current_year: i32) -> i32 {
    current_year + 1
}

/// Validate `year` against the window relative to `current_year`.
pub fn check_year_in(year: i32, current_year: i32) -> Result<(), CoreError> {
    let max = max_vehicle_year(current_year);
    if (MIN_VEHICLE_YEAR..=max).contains(&year) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid year. Must be between {MIN_VEHICLE_YEAR} and {max}"
        )))
    }
}

/// Validate `year` against the window relative to today (UTC).
pub fn check_year(year: i32) -> Result<(), CoreError> {
    check_year_in(year, Utc::now().year())
}
