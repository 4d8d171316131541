//! Repository for the `lap_times` table.

use pitwall_core::types::DbId;
use sqlx::PgPool;

use crate::models::lap_time::{CreateLapTime, LapTime, LapTimeDetail, LapTimeFilter, UpdateLapTime};

const COLUMNS: &str = "id, driver_id, vehicle_id, event_id, session_type, lap_number, lap_time_ms, \
                       sector1_ms, sector2_ms, sector3_ms, is_valid, notes, created_at, updated_at";

/// Lap columns qualified with `l.` plus driver, vehicle and event names.
const DETAIL_SELECT: &str = "SELECT l.id, l.driver_id, l.vehicle_id, l.event_id, l.session_type, \
        l.lap_number, l.lap_time_ms, l.sector1_ms, l.sector2_ms, l.sector3_ms, l.is_valid, l.notes, \
        l.created_at, l.updated_at, \
        u.first_name AS driver_first_name, u.last_name AS driver_last_name, \
        v.year AS vehicle_year, v.make AS vehicle_make, v.model AS vehicle_model, \
        e.name AS event_name \
     FROM lap_times l \
     JOIN drivers d ON d.id = l.driver_id \
     JOIN users u ON u.id = d.user_id \
     JOIN vehicles v ON v.id = l.vehicle_id \
     JOIN events e ON e.id = l.event_id";

/// Provides CRUD and analytics queries for lap times.
pub struct LapTimeRepo;

impl LapTimeRepo {
    /// Insert a lap. `is_valid` defaults to `true`.
    pub async fn create(pool: &PgPool, input: &CreateLapTime) -> Result<LapTime, sqlx::Error> {
        let query = format!(
            "INSERT INTO lap_times (driver_id, vehicle_id, event_id, session_type, lap_number,
                                    lap_time_ms, sector1_ms, sector2_ms, sector3_ms, is_valid, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, COALESCE($10, true), $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LapTime>(&query)
            .bind(input.driver_id)
            .bind(input.vehicle_id)
            .bind(input.event_id)
            .bind(&input.session_type)
            .bind(input.lap_number)
            .bind(input.lap_time_ms)
            .bind(input.sector1_ms)
            .bind(input.sector2_ms)
            .bind(input.sector3_ms)
            .bind(input.is_valid)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<LapTimeDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE l.id = $1");
        sqlx::query_as::<_, LapTimeDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List laps matching every present filter, ordered by event then lap number.
    pub async fn list(
        pool: &PgPool,
        filter: &LapTimeFilter,
    ) -> Result<Vec<LapTimeDetail>, sqlx::Error> {
        let query = format!(
            "{DETAIL_SELECT}
             WHERE ($1::UUID IS NULL OR l.event_id = $1)
               AND ($2::UUID IS NULL OR l.driver_id = $2)
               AND ($3::UUID IS NULL OR l.vehicle_id = $3)
               AND ($4::TEXT IS NULL OR l.session_type = $4)
             ORDER BY l.event_id, l.lap_number"
        );
        sqlx::query_as::<_, LapTimeDetail>(&query)
            .bind(filter.event_id)
            .bind(filter.driver_id)
            .bind(filter.vehicle_id)
            .bind(&filter.session_type)
            .fetch_all(pool)
            .await
    }

    /// Valid laps only, optionally scoped to one event, fastest first.
    pub async fn list_valid(
        pool: &PgPool,
        event_id: Option<DbId>,
    ) -> Result<Vec<LapTimeDetail>, sqlx::Error> {
        let query = format!(
            "{DETAIL_SELECT}
             WHERE l.is_valid = true
               AND ($1::UUID IS NULL OR l.event_id = $1)
             ORDER BY l.lap_time_ms ASC"
        );
        sqlx::query_as::<_, LapTimeDetail>(&query)
            .bind(event_id)
            .fetch_all(pool)
            .await
    }

    /// Update a lap. Returns `false` if the row does not exist.
    pub async fn update(pool: &PgPool, id: DbId, input: &UpdateLapTime) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE lap_times SET
                driver_id = COALESCE($2, driver_id),
                vehicle_id = COALESCE($3, vehicle_id),
                event_id = COALESCE($4, event_id),
                session_type = COALESCE($5, session_type),
                lap_number = COALESCE($6, lap_number),
                lap_time_ms = COALESCE($7, lap_time_ms),
                sector1_ms = COALESCE($8, sector1_ms),
                sector2_ms = COALESCE($9, sector2_ms),
                sector3_ms = COALESCE($10, sector3_ms),
                is_valid = COALESCE($11, is_valid),
                notes = COALESCE($12, notes),
                updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(input.driver_id)
        .bind(input.vehicle_id)
        .bind(input.event_id)
        .bind(&input.session_type)
        .bind(input.lap_number)
        .bind(input.lap_time_ms)
        .bind(input.sector1_ms)
        .bind(input.sector2_ms)
        .bind(input.sector3_ms)
        .bind(input.is_valid)
        .bind(&input.notes)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM lap_times WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of laps recorded; used by tests and diagnostics.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM lap_times")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}
