use std::time::Duration;

use async_trait::async_trait;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::{BehaviorVersion, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;
use pitwall_core::uploads::build_public_url;

use crate::config::StorageConfig;
use crate::store::{ObjectStore, StorageError};

/// [`ObjectStore`] backed by the AWS SDK S3 client.
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
    region: String,
    public_base_url: Option<String>,
}

impl S3ObjectStore {
    /// Build a client from static credentials. No network traffic happens
    /// until the first request.
    pub fn new(config: &StorageConfig) -> Self {
        let credentials = Credentials::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            None,
            None,
            "pitwall-env",
        );

        let mut builder = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials);

        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        tracing::info!(
            bucket = %config.bucket,
            region = %config.region,
            custom_endpoint = config.endpoint.is_some(),
            "Object store configured",
        );

        Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
            region: config.region.clone(),
            public_base_url: config.public_base_url.clone(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

fn presigning_config(expires_in: Duration) -> Result<PresigningConfig, StorageError> {
    PresigningConfig::expires_in(expires_in)
        .map_err(|e| StorageError::InvalidExpiry(e.to_string()))
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn presign_put(
        &self,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> Result<String, StorageError> {
        let request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .presigned(presigning_config(expires_in)?)
            .await
            .map_err(|e| StorageError::Presign {
                operation: "PUT",
                key: key.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;
        Ok(request.uri().to_string())
    }

    async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String, StorageError> {
        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning_config(expires_in)?)
            .await
            .map_err(|e| StorageError::Presign {
                operation: "GET",
                key: key.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;
        Ok(request.uri().to_string())
    }

    async fn delete_object(&self, key: &str) -> Result<(), StorageError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::Delete {
                key: key.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;
        tracing::debug!(key, bucket = %self.bucket, "Object deleted");
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        build_public_url(self.public_base_url.as_deref(), &self.bucket, &self.region, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minio_config() -> StorageConfig {
        StorageConfig {
            endpoint: Some("http://localhost:9000".into()),
            access_key_id: "minio".into(),
            secret_access_key: "minio-secret".into(),
            ..StorageConfig::default()
        }
    }

    #[tokio::test]
    async fn presigned_put_targets_bucket_and_key() {
        let store = S3ObjectStore::new(&minio_config());
        let url = store
            .presign_put(
                "vehicles/abc/photos/1_car.png",
                "image/png",
                Duration::from_secs(3600),
            )
            .await
            .unwrap();

        assert!(url.starts_with("http://localhost:9000/motorsports-uploads/vehicles/abc/photos/1_car.png?"));
        assert!(url.contains("X-Amz-Expires=3600"));
        assert!(url.contains("X-Amz-Signature="));
    }

    #[tokio::test]
    async fn presigned_get_uses_requested_expiry() {
        let store = S3ObjectStore::new(&minio_config());
        let url = store
            .presign_get("events/abc/documents/1_a.pdf", Duration::from_secs(900))
            .await
            .unwrap();
        assert!(url.contains("X-Amz-Expires=900"));
    }

    #[tokio::test]
    async fn oversized_expiry_is_rejected() {
        let store = S3ObjectStore::new(&minio_config());
        let err = store
            .presign_get("k", Duration::from_secs(8 * 24 * 3600))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidExpiry(_)));
    }

    #[test]
    fn public_url_prefers_configured_base() {
        let mut config = minio_config();
        let store = S3ObjectStore::new(&config);
        assert_eq!(
            store.public_url("vehicles/a/photos/x.png"),
            "https://motorsports-uploads.s3.us-east-1.amazonaws.com/vehicles/a/photos/x.png"
        );

        config.public_base_url = Some("https://cdn.example.com/".into());
        let store = S3ObjectStore::new(&config);
        assert_eq!(
            store.public_url("vehicles/a/photos/x.png"),
            "https://cdn.example.com/vehicles/a/photos/x.png"
        );
    }
}
