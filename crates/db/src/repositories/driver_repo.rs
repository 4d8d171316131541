//! Repository for the `drivers` table.

use pitwall_core::types::DbId;
use sqlx::PgPool;

use crate::models::driver::{CreateDriver, Driver, DriverDetail, UpdateDriver};

const COLUMNS: &str = "id, user_id, license_number, nationality, date_of_birth, bio, \
                       emergency_contact, medical_notes, created_at, updated_at";

/// Driver columns qualified with `d.` plus the owning user's public fields.
const DETAIL_SELECT: &str = "SELECT d.id, d.user_id, d.license_number, d.nationality, \
        d.date_of_birth, d.bio, d.emergency_contact, d.medical_notes, d.created_at, d.updated_at, \
        u.email AS user_email, u.first_name AS user_first_name, u.last_name AS user_last_name, \
        u.role AS user_role, u.is_active AS user_is_active \
     FROM drivers d \
     JOIN users u ON u.id = d.user_id";

/// Provides CRUD operations for driver profiles.
pub struct DriverRepo;

impl DriverRepo {
    /// Insert a profile. A second profile for the same user fails on
    /// `uq_drivers_user_id`.
    pub async fn create(pool: &PgPool, input: &CreateDriver) -> Result<Driver, sqlx::Error> {
        let query = format!(
            "INSERT INTO drivers (user_id, license_number, nationality, date_of_birth, bio,
                                  emergency_contact, medical_notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Driver>(&query)
            .bind(input.user_id)
            .bind(&input.license_number)
            .bind(&input.nationality)
            .bind(input.date_of_birth)
            .bind(&input.bio)
            .bind(&input.emergency_contact)
            .bind(&input.medical_notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<DriverDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE d.id = $1");
        sqlx::query_as::<_, DriverDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_user_id(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<DriverDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE d.user_id = $1");
        sqlx::query_as::<_, DriverDetail>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM drivers WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// List all drivers with their user summary, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<DriverDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} ORDER BY d.created_at DESC");
        sqlx::query_as::<_, DriverDetail>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update a profile. Returns `false` if the row does not exist.
    pub async fn update(pool: &PgPool, id: DbId, input: &UpdateDriver) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE drivers SET
                license_number = COALESCE($2, license_number),
                nationality = COALESCE($3, nationality),
                date_of_birth = COALESCE($4, date_of_birth),
                bio = COALESCE($5, bio),
                emergency_contact = COALESCE($6, emergency_contact),
                medical_notes = COALESCE($7, medical_notes),
                updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.license_number)
        .bind(&input.nationality)
        .bind(input.date_of_birth)
        .bind(&input.bio)
        .bind(&input.emergency_contact)
        .bind(&input.medical_notes)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM drivers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
