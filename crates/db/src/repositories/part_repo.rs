//! Repository for the `parts` table.

use pitwall_core::inventory::{DEFAULT_LOW_STOCK_THRESHOLD, DEFAULT_QUANTITY, DEFAULT_UNIT};
use pitwall_core::types::DbId;
use sqlx::PgPool;

use crate::models::part::{CreatePart, Part, PartFilter, UpdatePart};

const COLUMNS: &str = "id, name, part_number, category, quantity, unit, cost, supplier, location, \
                       low_stock_threshold, notes, vehicle_id, created_at, updated_at";

/// Provides CRUD and stock operations for parts.
pub struct PartRepo;

impl PartRepo {
    /// Insert a part, applying the inventory defaults for omitted fields.
    pub async fn create(pool: &PgPool, input: &CreatePart) -> Result<Part, sqlx::Error> {
        let query = format!(
            "INSERT INTO parts (name, part_number, category, quantity, unit, cost, supplier,
                                location, low_stock_threshold, notes, vehicle_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Part>(&query)
            .bind(&input.name)
            .bind(&input.part_number)
            .bind(&input.category)
            .bind(input.quantity.unwrap_or(DEFAULT_QUANTITY))
            .bind(input.unit.as_deref().unwrap_or(DEFAULT_UNIT))
            .bind(input.cost)
            .bind(&input.supplier)
            .bind(&input.location)
            .bind(input.low_stock_threshold.unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD))
            .bind(&input.notes)
            .bind(input.vehicle_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Part>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM parts WHERE id = $1");
        sqlx::query_as::<_, Part>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List parts matching every present filter, ordered by category then name.
    pub async fn list(pool: &PgPool, filter: &PartFilter) -> Result<Vec<Part>, sqlx::Error> {
        let search = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", escape_like(s)));
        let query = format!(
            "SELECT {COLUMNS} FROM parts
             WHERE ($1::TEXT IS NULL OR category = $1)
               AND ($2::UUID IS NULL OR vehicle_id = $2)
               AND ($3::BOOL IS NOT TRUE OR quantity <= low_stock_threshold)
               AND ($4::TEXT IS NULL
                    OR name ILIKE $4
                    OR part_number ILIKE $4
                    OR supplier ILIKE $4
                    OR location ILIKE $4)
             ORDER BY category, name"
        );
        sqlx::query_as::<_, Part>(&query)
            .bind(&filter.category)
            .bind(filter.vehicle_id)
            .bind(filter.low_stock)
            .bind(search)
            .fetch_all(pool)
            .await
    }

    /// Every part, for the inventory summary.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Part>, sqlx::Error> {
        Self::list(pool, &PartFilter::default()).await
    }

    /// Update a part. Only non-`None` fields in `input` are applied;
    /// `vehicle_id: Some(None)` unlinks the vehicle.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePart,
    ) -> Result<Option<Part>, sqlx::Error> {
        let query = format!(
            "UPDATE parts SET
                name = COALESCE($2, name),
                part_number = COALESCE($3, part_number),
                category = COALESCE($4, category),
                quantity = COALESCE($5, quantity),
                unit = COALESCE($6, unit),
                cost = COALESCE($7, cost),
                supplier = COALESCE($8, supplier),
                location = COALESCE($9, location),
                low_stock_threshold = COALESCE($10, low_stock_threshold),
                notes = COALESCE($11, notes),
                vehicle_id = CASE WHEN $12 THEN $13 ELSE vehicle_id END,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Part>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.part_number)
            .bind(&input.category)
            .bind(input.quantity)
            .bind(&input.unit)
            .bind(input.cost)
            .bind(&input.supplier)
            .bind(&input.location)
            .bind(input.low_stock_threshold)
            .bind(&input.notes)
            .bind(input.vehicle_id.is_some())
            .bind(input.vehicle_id.flatten())
            .fetch_optional(pool)
            .await
    }

    /// Overwrite the stock level. Concurrent adjustments are last-write-wins.
    pub async fn set_quantity(
        pool: &PgPool,
        id: DbId,
        quantity: i32,
    ) -> Result<Option<Part>, sqlx::Error> {
        let query = format!(
            "UPDATE parts SET quantity = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Part>(&query)
            .bind(id)
            .bind(quantity)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM parts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Escape `%`, `_` and `\` so user input matches literally inside ILIKE.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
