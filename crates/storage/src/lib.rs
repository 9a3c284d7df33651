//! Object-storage boundary.
//!
//! Character image blobs live in S3-compatible storage under opaque keys.
//! The database only ever stores the key; accessible URLs are minted on
//! demand as short-lived presigned requests. The [`ObjectStorage`] trait is
//! the seam: handlers receive it by explicit injection so tests can swap in
//! a fake without touching AWS.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("invalid presigning configuration: {0}")]
    Presigning(String),

    #[error("storage provider error: {0}")]
    Provider(String),
}

/// Presigned-URL provider for character image blobs.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// A short-lived URL granting read access to `key`.
    async fn download_url(&self, key: &str) -> Result<String, StorageError>;

    /// A short-lived URL granting a single PUT of `content_type` data at
    /// `key`.
    async fn upload_url(&self, key: &str, content_type: &str) -> Result<String, StorageError>;
}

/// Storage configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Bucket holding character image blobs.
    pub bucket: String,
    /// Presigned download URL lifetime in seconds (default: `3600`).
    pub download_expiry_secs: u64,
    /// Presigned upload URL lifetime in seconds (default: `600`).
    pub upload_expiry_secs: u64,
}

impl StorageConfig {
    /// Load storage configuration from environment variables.
    ///
    /// | Env Var                        | Required | Default |
    /// |--------------------------------|----------|---------|
    /// | `STORAGE_BUCKET`               | **yes**  | --      |
    /// | `STORAGE_DOWNLOAD_EXPIRY_SECS` | no       | `3600`  |
    /// | `STORAGE_UPLOAD_EXPIRY_SECS`   | no       | `600`   |
    ///
    /// # Panics
    ///
    /// Panics if `STORAGE_BUCKET` is not set.
    pub fn from_env() -> Self {
        let bucket =
            std::env::var("STORAGE_BUCKET").expect("STORAGE_BUCKET must be set in the environment");

        let download_expiry_secs: u64 = std::env::var("STORAGE_DOWNLOAD_EXPIRY_SECS")
            .unwrap_or_else(|_| "3600".into())
            .parse()
            .expect("STORAGE_DOWNLOAD_EXPIRY_SECS must be a valid u64");

        let upload_expiry_secs: u64 = std::env::var("STORAGE_UPLOAD_EXPIRY_SECS")
            .unwrap_or_else(|_| "600".into())
            .parse()
            .expect("STORAGE_UPLOAD_EXPIRY_SECS must be a valid u64");

        Self {
            bucket,
            download_expiry_secs,
            upload_expiry_secs,
        }
    }
}

/// S3-backed [`ObjectStorage`] implementation.
pub struct S3ObjectStorage {
    client: aws_sdk_s3::Client,
    config: StorageConfig,
}

impl S3ObjectStorage {
    /// Build a client from the ambient AWS environment (credentials chain,
    /// region, endpoint overrides).
    pub async fn from_env(config: StorageConfig) -> Self {
        let shared = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self {
            client: aws_sdk_s3::Client::new(&shared),
            config,
        }
    }

    fn presigning(&self, expires_in: Duration) -> Result<PresigningConfig, StorageError> {
        PresigningConfig::expires_in(expires_in).map_err(|e| StorageError::Presigning(e.to_string()))
    }
}

#[async_trait]
impl ObjectStorage for S3ObjectStorage {
    async fn download_url(&self, key: &str) -> Result<String, StorageError> {
        let expires_in = Duration::from_secs(self.config.download_expiry_secs);

        let presigned = self
            .client
            .get_object()
            .bucket(&self.config.bucket)
            .key(key)
            .presigned(self.presigning(expires_in)?)
            .await
            .map_err(|e| StorageError::Provider(e.to_string()))?;

        Ok(presigned.uri().to_string())
    }

    async fn upload_url(&self, key: &str, content_type: &str) -> Result<String, StorageError> {
        let expires_in = Duration::from_secs(self.config.upload_expiry_secs);

        let presigned = self
            .client
            .put_object()
            .bucket(&self.config.bucket)
            .key(key)
            .content_type(content_type)
            .presigned(self.presigning(expires_in)?)
            .await
            .map_err(|e| StorageError::Provider(e.to_string()))?;

        Ok(presigned.uri().to_string())
    }
}
