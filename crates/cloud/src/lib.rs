//! S3-compatible object storage for uploaded photos and documents.
//!
//! Files never pass through the API: callers receive presigned URLs and talk
//! to the bucket directly. The API only signs requests, deletes objects and
//! derives public URLs.

pub mod config;
pub mod s3;
pub mod store;

pub use config::StorageConfig;
pub use s3::S3ObjectStore;
pub use store::{ObjectStore, StorageError};
