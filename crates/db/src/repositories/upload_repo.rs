//! Repository for the `uploads` table.

use pitwall_core::types::DbId;
use sqlx::PgPool;

use crate::models::upload::{CreateUpload, Upload, UploadFilter};

const COLUMNS: &str = "id, entity_type, entity_id, vehicle_id, event_id, file_name, file_key, \
                       file_url, mime_type, category, size_bytes, uploaded_by_id, created_at, updated_at";

/// Provides CRUD operations for upload metadata.
pub struct UploadRepo;

impl UploadRepo {
    pub async fn create(pool: &PgPool, input: &CreateUpload) -> Result<Upload, sqlx::Error> {
        let query = format!(
            "INSERT INTO uploads (entity_type, entity_id, vehicle_id, event_id, file_name, file_key,
                                  file_url, mime_type, category, size_bytes, uploaded_by_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Upload>(&query)
            .bind(&input.entity_type)
            .bind(input.entity_id)
            .bind(input.vehicle_id)
            .bind(input.event_id)
            .bind(&input.file_name)
            .bind(&input.file_key)
            .bind(&input.file_url)
            .bind(&input.mime_type)
            .bind(&input.category)
            .bind(input.size_bytes)
            .bind(input.uploaded_by_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Upload>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM uploads WHERE id = $1");
        sqlx::query_as::<_, Upload>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List uploads matching every present filter, newest first.
    pub async fn list(pool: &PgPool, filter: &UploadFilter) -> Result<Vec<Upload>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM uploads
             WHERE ($1::TEXT IS NULL OR entity_type = $1)
               AND ($2::UUID IS NULL OR entity_id = $2)
               AND ($3::TEXT IS NULL OR category = $3)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Upload>(&query)
            .bind(&filter.entity_type)
            .bind(filter.entity_id)
            .bind(&filter.category)
            .fetch_all(pool)
            .await
    }

    /// Delete the metadata row. The stored object is the caller's concern.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM uploads WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
