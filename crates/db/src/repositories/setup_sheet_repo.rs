//! Repository for the `setup_sheets` table.

use pitwall_core::types::DbId;
use sqlx::PgPool;

use crate::models::setup_sheet::{CreateSetupSheet, SetupSheet, SetupSheetFilter, UpdateSetupSheet};

const COLUMNS: &str = "id, vehicle_id, event_id, created_by_id, session_type, session_number, \
     tyre_front_left, tyre_front_right, tyre_rear_left, tyre_rear_right, \
     tyre_pressure_fl, tyre_pressure_fr, tyre_pressure_rl, tyre_pressure_rr, \
     ride_height_front, ride_height_rear, spring_rate_front, spring_rate_rear, \
     damper_front, damper_rear, camber_front, camber_rear, toe_in_front, toe_in_rear, \
     front_wing_angle, rear_wing_angle, downforce_level, brake_bias, brake_compound, \
     engine_map, differential_entry, differential_mid, differential_exit, \
     fuel_load, notes, driver_feedback, created_at, updated_at";

/// Provides CRUD operations for setup sheets.
pub struct SetupSheetRepo;

impl SetupSheetRepo {
    /// Insert a sheet owned by `created_by_id`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSetupSheet,
        created_by_id: DbId,
    ) -> Result<SetupSheet, sqlx::Error> {
        let query = format!(
            "INSERT INTO setup_sheets (
                vehicle_id, event_id, created_by_id, session_type, session_number,
                tyre_front_left, tyre_front_right, tyre_rear_left, tyre_rear_right,
                tyre_pressure_fl, tyre_pressure_fr, tyre_pressure_rl, tyre_pressure_rr,
                ride_height_front, ride_height_rear, spring_rate_front, spring_rate_rear,
                damper_front, damper_rear, camber_front, camber_rear, toe_in_front, toe_in_rear,
                front_wing_angle, rear_wing_angle, downforce_level, brake_bias, brake_compound,
                engine_map, differential_entry, differential_mid, differential_exit,
                fuel_load, notes, driver_feedback
             ) VALUES (
                $1, $2, $3, $4, $5,
                $6, $7, $8, $9,
                $10, $11, $12, $13,
                $14, $15, $16, $17,
                $18, $19, $20, $21, $22, $23,
                $24, $25, $26, $27, $28,
                $29, $30, $31, $32,
                $33, $34, $35
             )
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SetupSheet>(&query)
            .bind(input.vehicle_id)
            .bind(input.event_id)
            .bind(created_by_id)
            .bind(&input.session_type)
            .bind(input.session_number)
            .bind(&input.tyre_front_left)
            .bind(&input.tyre_front_right)
            .bind(&input.tyre_rear_left)
            .bind(&input.tyre_rear_right)
            .bind(input.tyre_pressure_fl)
            .bind(input.tyre_pressure_fr)
            .bind(input.tyre_pressure_rl)
            .bind(input.tyre_pressure_rr)
            .bind(input.ride_height_front)
            .bind(input.ride_height_rear)
            .bind(input.spring_rate_front)
            .bind(input.spring_rate_rear)
            .bind(&input.damper_front)
            .bind(&input.damper_rear)
            .bind(input.camber_front)
            .bind(input.camber_rear)
            .bind(input.toe_in_front)
            .bind(input.toe_in_rear)
            .bind(input.front_wing_angle)
            .bind(input.rear_wing_angle)
            .bind(&input.downforce_level)
            .bind(input.brake_bias)
            .bind(&input.brake_compound)
            .bind(&input.engine_map)
            .bind(input.differential_entry)
            .bind(input.differential_mid)
            .bind(input.differential_exit)
            .bind(input.fuel_load)
            .bind(&input.notes)
            .bind(&input.driver_feedback)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<SetupSheet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM setup_sheets WHERE id = $1");
        sqlx::query_as::<_, SetupSheet>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List sheets, optionally narrowed to an event and/or vehicle. Newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &SetupSheetFilter,
    ) -> Result<Vec<SetupSheet>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM setup_sheets
             WHERE ($1::UUID IS NULL OR event_id = $1)
               AND ($2::UUID IS NULL OR vehicle_id = $2)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, SetupSheet>(&query)
            .bind(filter.event_id)
            .bind(filter.vehicle_id)
            .fetch_all(pool)
            .await
    }

    /// Update a sheet. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSetupSheet,
    ) -> Result<Option<SetupSheet>, sqlx::Error> {
        let query = format!(
            "UPDATE setup_sheets SET
                session_type = COALESCE($2, session_type),
                session_number = COALESCE($3, session_number),
                tyre_front_left = COALESCE($4, tyre_front_left),
                tyre_front_right = COALESCE($5, tyre_front_right),
                tyre_rear_left = COALESCE($6, tyre_rear_left),
                tyre_rear_right = COALESCE($7, tyre_rear_right),
                tyre_pressure_fl = COALESCE($8, tyre_pressure_fl),
                tyre_pressure_fr = COALESCE($9, tyre_pressure_fr),
                tyre_pressure_rl = COALESCE($10, tyre_pressure_rl),
                tyre_pressure_rr = COALESCE($11, tyre_pressure_rr),
                ride_height_front = COALESCE($12, ride_height_front),
                ride_height_rear = COALESCE($13, ride_height_rear),
                spring_rate_front = COALESCE($14, spring_rate_front),
                spring_rate_rear = COALESCE($15, spring_rate_rear),
                damper_front = COALESCE($16, damper_front),
                damper_rear = COALESCE($17, damper_rear),
                camber_front = COALESCE($18, camber_front),
                camber_rear = COALESCE($19, camber_rear),
                toe_in_front = COALESCE($20, toe_in_front),
                toe_in_rear = COALESCE($21, toe_in_rear),
                front_wing_angle = COALESCE($22, front_wing_angle),
                rear_wing_angle = COALESCE($23, rear_wing_angle),
                downforce_level = COALESCE($24, downforce_level),
                brake_bias = COALESCE($25, brake_bias),
                brake_compound = COALESCE($26, brake_compound),
                engine_map = COALESCE($27, engine_map),
                differential_entry = COALESCE($28, differential_entry),
                differential_mid = COALESCE($29, differential_mid),
                differential_exit = COALESCE($30, differential_exit),
                fuel_load = COALESCE($31, fuel_load),
                notes = COALESCE($32, notes),
                driver_feedback = COALESCE($33, driver_feedback),
                vehicle_id = COALESCE($34, vehicle_id),
                event_id = COALESCE($35, event_id),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SetupSheet>(&query)
            .bind(id)
            .bind(&input.session_type)
            .bind(input.session_number)
            .bind(&input.tyre_front_left)
            .bind(&input.tyre_front_right)
            .bind(&input.tyre_rear_left)
            .bind(&input.tyre_rear_right)
            .bind(input.tyre_pressure_fl)
            .bind(input.tyre_pressure_fr)
            .bind(input.tyre_pressure_rl)
            .bind(input.tyre_pressure_rr)
            .bind(input.ride_height_front)
            .bind(input.ride_height_rear)
            .bind(input.spring_rate_front)
            .bind(input.spring_rate_rear)
            .bind(&input.damper_front)
            .bind(&input.damper_rear)
            .bind(input.camber_front)
            .bind(input.camber_rear)
            .bind(input.toe_in_front)
            .bind(input.toe_in_rear)
            .bind(input.front_wing_angle)
            .bind(input.rear_wing_angle)
            .bind(&input.downforce_level)
            .bind(input.brake_bias)
            .bind(&input.brake_compound)
            .bind(&input.engine_map)
            .bind(input.differential_entry)
            .bind(input.differential_mid)
            .bind(input.differential_exit)
            .bind(input.fuel_load)
            .bind(&input.notes)
            .bind(&input.driver_feedback)
            .bind(input.vehicle_id)
            .bind(input.event_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM setup_sheets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
