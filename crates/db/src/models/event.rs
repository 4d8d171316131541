//! Event entity model and request schemas.

use pitwall_core::events::{check_date_range, check_event_type, check_status};
use pitwall_core::types::{DbId, Timestamp};
use pitwall_core::validation::rule_violation;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// A row from the `events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: DbId,
    pub name: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub event_type: String,
    pub venue: String,
    pub location: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub status: String,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body of `POST /api/events`. Dates are ISO 8601 / RFC 3339.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[validate(schema(function = "validate_create_event"))]
pub struct CreateEvent {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(rename = "type")]
    pub event_type: String,
    #[validate(length(min = 1, message = "venue is required"))]
    pub venue: String,
    #[validate(length(min = 1, message = "location is required"))]
    pub location: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    /// Defaults to `Upcoming` if omitted.
    pub status: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
}

fn validate_create_event(input: &CreateEvent) -> Result<(), ValidationError> {
    check_event_type(&input.event_type).map_err(rule_violation)?;
    if let Some(status) = &input.status {
        check_status(status).map_err(rule_violation)?;
    }
    check_date_range(input.start_date, input.end_date).map_err(rule_violation)
}

/// Body of `PUT /api/events/{id}`. All fields are optional.
///
/// The date-order rule needs the stored row when only one date is sent,
/// so the handler re-checks it against the merged values.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[validate(schema(function = "validate_update_event"))]
pub struct UpdateEvent {
    #[validate(length(min = 1, message = "name cannot be empty"))]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    #[validate(length(min = 1, message = "venue cannot be empty"))]
    pub venue: Option<String>,
    #[validate(length(min = 1, message = "location cannot be empty"))]
    pub location: Option<String>,
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
}

fn validate_update_event(input: &UpdateEvent) -> Result<(), ValidationError> {
    if let Some(event_type) = &input.event_type {
        check_event_type(event_type).map_err(rule_violation)?;
    }
    if let Some(status) = &input.status {
        check_status(status).map_err(rule_violation)?;
    }
    Ok(())
}

impl UpdateEvent {
    /// The start/end pair the row will have once this patch is applied.
    pub fn effective_dates(&self, current: &Event) -> (Timestamp, Timestamp) {
        (
            self.start_date.unwrap_or(current.start_date),
            self.end_date.unwrap_or(current.end_date),
        )
    }
}
