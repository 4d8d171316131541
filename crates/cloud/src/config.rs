/// Object storage configuration loaded from environment variables.
///
/// Works against AWS S3 (leave `S3_ENDPOINT` unset) or any S3-compatible
/// service such as MinIO, Cloudflare R2 or Backblaze B2.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub region: String,
    /// Custom endpoint. When set, path-style addressing is used.
    pub endpoint: Option<String>,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket: String,
    /// Prefix for public object URLs (CDN or bucket website).
    pub public_base_url: Option<String>,
    /// Lifetime of presigned upload URLs in seconds.
    pub presign_expiry_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            region: "us-east-1".into(),
            endpoint: None,
            access_key_id: String::new(),
            secret_access_key: String::new(),
            bucket: "motorsports-uploads".into(),
            public_base_url: None,
            presign_expiry_secs: 3600,
        }
    }
}

impl StorageConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default               |
    /// |----------------------------|-----------------------|
    /// | `S3_REGION`                | `us-east-1`           |
    /// | `S3_ENDPOINT`              | (unset)               |
    /// | `S3_ACCESS_KEY_ID`         | (empty)               |
    /// | `S3_SECRET_ACCESS_KEY`     | (empty)               |
    /// | `S3_BUCKET_NAME`           | `motorsports-uploads` |
    /// | `S3_PUBLIC_BASE_URL`       | (unset)               |
    /// | `PRESIGNED_URL_EXPIRES_IN` | `3600`                |
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let presign_expiry_secs: u64 = std::env::var("PRESIGNED_URL_EXPIRES_IN")
            .unwrap_or_else(|_| defaults.presign_expiry_secs.to_string())
            .parse()
            .expect("PRESIGNED_URL_EXPIRES_IN must be a valid u64");

        Self {
            region: non_empty_var("S3_REGION").unwrap_or(defaults.region),
            endpoint: non_empty_var("S3_ENDPOINT"),
            access_key_id: std::env::var("S3_ACCESS_KEY_ID").unwrap_or_default(),
            secret_access_key: std::env::var("S3_SECRET_ACCESS_KEY").unwrap_or_default(),
            bucket: non_empty_var("S3_BUCKET_NAME").unwrap_or(defaults.bucket),
            public_base_url: non_empty_var("S3_PUBLIC_BASE_URL"),
            presign_expiry_secs,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
