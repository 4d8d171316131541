//! Event enumerations and date rules.

use crate::error::CoreError;
use crate::types::Timestamp;
use crate::validation::check_one_of;

pub const STATUS_UPCOMING: &str = "Upcoming";

/// Accepted event statuses, in declared order.
pub const EVENT_STATUSES: &[&str] = &[STATUS_UPCOMING, "In Progress", "Completed", "Cancelled"];

/// Accepted event types, in declared order.
pub const EVENT_TYPES: &[&str] = &[
    "Race",
    "Qualifying",
    "Practice",
    "Test Day",
    "Track Day",
    "Other",
];

pub fn check_status(status: &str) -> Result<(), CoreError> {
    check_one_of("status", status, EVENT_STATUSES)
}

pub fn check_event_type(event_type: &str) -> Result<(), CoreError> {
    check_one_of("type", event_type, EVENT_TYPES)
}

/// An event may end on the same instant it starts, never before.
pub fn check_date_range(start: Timestamp, end: Timestamp) -> Result<(), CoreError> {
    if end < start {
        Err(CoreError::Validation(
            "endDate must be on or after startDate".to_string(),
        ))
    } else {
        Ok(())
    }
}
