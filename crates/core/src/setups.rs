//! Setup sheet enumerations.

use crate::error::CoreError;
use crate::validation::{check_one_of, check_optional_one_of};

/// Sessions a setup sheet can be recorded for.
pub const SETUP_SESSION_TYPES: &[&str] =
    &["Practice", "Qualifying", "Race", "Test", "Warm-Up", "Other"];

pub const DOWNFORCE_LEVELS: &[&str] = &["Low", "Medium", "High"];

pub fn check_session_type(session_type: &str) -> Result<(), CoreError> {
    check_one_of("sessionType", session_type, SETUP_SESSION_TYPES)
}

pub fn check_downforce_level(level: Option<&str>) -> Result<(), CoreError> {
    check_optional_one_of("downforceLevel", level, DOWNFORCE_LEVELS)
}
