use crate::keys::{generate_blob_key, object_path};
use crate::traits::{BlobStore, StorageError, StorageResult, UploadIntent};
use crate::{MediaFolder, StorageBackend};
use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::Error as ObjectStoreError;
use object_store::{ObjectStoreExt, PutPayload, Result as ObjectResult};

/// S3 blob store
#[derive(Clone)]
pub struct S3Storage {
    store: AmazonS3,
    bucket: String,
    region: String,
    endpoint_url: Option<String>, // Custom endpoint for S3-compatible providers
    public_base_url: Option<String>,
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    /// * `public_base_url` - Optional CDN or public origin used for blob URLs
    pub async fn new(
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
        public_base_url: Option<String>,
    ) -> StorageResult<Self> {
        let mut builder = AmazonS3Builder::from_env()
            .with_region(region.clone())
            .with_bucket_name(bucket.clone());

        if let Some(ref endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(S3Storage {
            store,
            bucket,
            region,
            endpoint_url,
            public_base_url,
        })
    }

    /// Public URL for an object path.
    ///
    /// Precedence: explicit public base URL, then the custom endpoint (path-style),
    /// then the standard AWS virtual-hosted URL.
    fn generate_url(&self, path: &str) -> String {
        if let Some(ref base) = self.public_base_url {
            format!("{}/{}", base.trim_end_matches('/'), path)
        } else if let Some(ref endpoint) = self.endpoint_url {
            format!("{}/{}/{}", endpoint.trim_end_matches('/'), self.bucket, path)
        } else {
            format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                self.bucket, self.region, path
            )
        }
    }
}

#[async_trait]
impl BlobStore for S3Storage {
    async fn put(&self, folder: &MediaFolder, upload: UploadIntent) -> StorageResult<String> {
        let key = generate_blob_key(&upload.filename);
        let path = object_path(folder, &key)?;
        let size = upload.size() as u64;
        let location = Path::from(path.clone());

        let start = std::time::Instant::now();

        let result: ObjectResult<_> = self
            .store
            .put(&location, PutPayload::from(Bytes::from(upload.data)))
            .await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %path,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 upload failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %path,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(key)
    }

    async fn delete(&self, folder: &MediaFolder, key: &str) -> StorageResult<()> {
        let path = object_path(folder, key)?;
        let location = Path::from(path.clone());
        let start = std::time::Instant::now();

        let result: ObjectResult<_> = self.store.delete(&location).await;

        match result {
            Ok(_) | Err(ObjectStoreError::NotFound { .. }) => {}
            Err(e) => {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %path,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 delete failed"
                );
                return Err(StorageError::DeleteFailed(e.to_string()));
            }
        }

        tracing::info!(
            bucket = %self.bucket,
            key = %path,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 delete successful"
        );

        Ok(())
    }

    fn url_for(&self, folder: &MediaFolder, key: &str) -> String {
        if key.is_empty() {
            return String::new();
        }
        self.generate_url(&format!("{}/{}", folder, key))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn storage(endpoint: Option<&str>, public: Option<&str>) -> S3Storage {
        S3Storage::new(
            "atrium-media".to_string(),
            "eu-west-1".to_string(),
            endpoint.map(String::from),
            public.map(String::from),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_aws_virtual_hosted_url() {
        let s3 = storage(None, None).await;
        assert_eq!(
            s3.url_for(&MediaFolder::Members, "a.jpg"),
            "https://atrium-media.s3.eu-west-1.amazonaws.com/members/a.jpg"
        );
    }

    #[tokio::test]
    async fn test_endpoint_path_style_url() {
        let s3 = storage(Some("http://localhost:9000/"), None).await;
        assert_eq!(
            s3.url_for(&MediaFolder::Ads, "b.png"),
            "http://localhost:9000/atrium-media/ads/b.png"
        );
    }

    #[tokio::test]
    async fn test_public_base_url_wins() {
        let s3 = storage(Some("http://localhost:9000"), Some("https://cdn.example.org")).await;
        assert_eq!(
            s3.url_for(&MediaFolder::Settings, "logo.svg"),
            "https://cdn.example.org/settings/logo.svg"
        );
        assert_eq!(s3.url_for(&MediaFolder::Settings, ""), "");
    }
}
