//! Driver profile model and request schemas.

use chrono::NaiveDate;
use pitwall_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `drivers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: DbId,
    pub user_id: DbId,
    pub license_number: Option<String>,
    pub nationality: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub bio: Option<String>,
    pub emergency_contact: Option<String>,
    pub medical_notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A driver joined with the owning user's public fields.
#[derive(Debug, Clone, FromRow)]
pub struct DriverDetail {
    #[sqlx(flatten)]
    pub driver: Driver,
    pub user_email: String,
    pub user_first_name: String,
    pub user_last_name: String,
    pub user_role: String,
    pub user_is_active: bool,
}

/// User summary embedded in driver responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverUser {
    pub id: DbId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverResponse {
    #[serde(flatten)]
    pub driver: Driver,
    pub user: DriverUser,
}

impl From<DriverDetail> for DriverResponse {
    fn from(detail: DriverDetail) -> Self {
        let user = DriverUser {
            id: detail.driver.user_id,
            email: detail.user_email,
            first_name: detail.user_first_name,
            last_name: detail.user_last_name,
            role: detail.user_role,
            is_active: detail.user_is_active,
        };
        Self {
            driver: detail.driver,
            user,
        }
    }
}

/// Body of `POST /api/drivers`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateDriver {
    pub user_id: DbId,
    pub license_number: Option<String>,
    pub nationality: Option<String>,
    /// `YYYY-MM-DD`.
    pub date_of_birth: Option<NaiveDate>,
    pub bio: Option<String>,
    pub emergency_contact: Option<String>,
    pub medical_notes: Option<String>,
}

/// Body of `PUT /api/drivers/{id}`. The owning user cannot be changed.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateDriver {
    pub license_number: Option<String>,
    pub nationality: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub bio: Option<String>,
    pub emergency_contact: Option<String>,
    pub medical_notes: Option<String>,
}
