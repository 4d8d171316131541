use std::time::Duration;

use async_trait::async_trait;

/// Errors raised by an object store backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid presign expiry: {0}")]
    InvalidExpiry(String),

    #[error("Failed to presign {operation} for {key}: {message}")]
    Presign {
        operation: &'static str,
        key: String,
        message: String,
    },

    #[error("Failed to delete object {key}: {message}")]
    Delete { key: String, message: String },
}

/// A bucket the API can sign requests against.
///
/// Implemented by [`crate::S3ObjectStore`] in production and by in-memory
/// doubles in tests.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Presigned URL the client can `PUT` the file bytes to.
    async fn presign_put(
        &self,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> Result<String, StorageError>;

    /// Presigned URL for a short-lived `GET` of an existing object.
    async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String, StorageError>;

    async fn delete_object(&self, key: &str) -> Result<(), StorageError>;

    /// Stable public URL for `key` (not signed).
    fn public_url(&self, key: &str) -> String;
}
