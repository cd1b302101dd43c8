// [libs/infra/object-store/src/client.rs]
/*!
 * =================================================================
 * APARATO: SOVEREIGN OBJECT STORE UPLINK (V1.0)
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: SUBIDA IDEMPOTENTE "UPLOAD IF ABSENT"
 * =================================================================
 */

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument, warn};

use crate::errors::ObjectStoreError;

const MAX_UPLOAD_ATTEMPTS: u32 = 4;
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// The three buckets the core touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Images,
    Videos,
    Screenshots,
}

impl Bucket {
    pub fn name(self) -> &'static str {
        match self {
            Bucket::Images => "facebook_ad_images",
            Bucket::Videos => "facebook_ad_videos",
            Bucket::Screenshots => "facebook_ad_archive_screenshots",
        }
    }
}

/// Idempotent "upload if absent" for blobs.
#[async_trait]
pub trait ObjectStoreClient: Send + Sync {
    /// If an object already exists at `path`, does not re-upload and
    /// returns its id. Otherwise uploads and returns the new id.
    async fn upload(
        &self,
        bucket: Bucket,
        path: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ObjectStoreError>;
}

pub struct HttpObjectStoreClient {
    http: Client,
    base_url: String,
}

impl HttpObjectStoreClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::builder()
                .timeout(Duration::from_secs(60))
                .build()
                .expect("FATAL: object store client initialization failed."),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn object_url(&self, bucket: Bucket, path: &str) -> String {
        format!("{}/{}/{}", self.base_url, bucket.name(), path)
    }

    async fn exists(&self, url: &str) -> Result<bool, ObjectStoreError> {
        let response = self.http.head(url).send().await?;
        Ok(response.status() == StatusCode::OK)
    }

    fn backoff_delay(attempt: u32) -> Duration {
        let base = Duration::from_millis(500 * 2u64.pow(attempt));
        let capped = base.min(MAX_BACKOFF);
        let jitter_ms = rand::thread_rng().gen_range(0..=(capped.as_millis() as u64 / 2).max(1));
        capped + Duration::from_millis(jitter_ms)
    }
}

#[async_trait]
impl ObjectStoreClient for HttpObjectStoreClient {
    #[instrument(skip(self, bytes))]
    async fn upload(
        &self,
        bucket: Bucket,
        path: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ObjectStoreError> {
        let url = self.object_url(bucket, path);

        if self.exists(&url).await? {
            debug!(%path, "blob already present, skipping upload");
            return Ok(path.to_string());
        }

        let mut last_error = None;
        for attempt in 0..MAX_UPLOAD_ATTEMPTS {
            match self.http.put(&url).body(bytes.clone()).send().await {
                Ok(response) if response.status().is_success() => return Ok(path.to_string()),
                Ok(response) => {
                    last_error = Some(ObjectStoreError::ServerRejection(
                        response.status().to_string(),
                    ));
                }
                Err(err) => last_error = Some(ObjectStoreError::NetworkFault(err)),
            }

            if attempt + 1 < MAX_UPLOAD_ATTEMPTS {
                let delay = Self::backoff_delay(attempt);
                warn!(%path, attempt, delay_ms = delay.as_millis() as u64, "upload attempt failed, retrying");
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error.expect("at least one upload attempt always runs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_names_match_the_external_contract() {
        assert_eq!(Bucket::Images.name(), "facebook_ad_images");
        assert_eq!(Bucket::Videos.name(), "facebook_ad_videos");
        assert_eq!(Bucket::Screenshots.name(), "facebook_ad_archive_screenshots");
    }

    #[test]
    fn backoff_delay_never_exceeds_the_cap_plus_jitter_bound() {
        for attempt in 0..MAX_UPLOAD_ATTEMPTS {
            let delay = HttpObjectStoreClient::backoff_delay(attempt);
            assert!(delay <= MAX_BACKOFF + Duration::from_millis(MAX_BACKOFF.as_millis() as u64 / 2));
        }
    }

    #[test]
    fn object_url_joins_base_bucket_and_path() {
        let client = HttpObjectStoreClient::new("https://store.example/");
        let url = client.object_url(Bucket::Images, "ab/cd/abcd.jpg");
        assert_eq!(url, "https://store.example/facebook_ad_images/ab/cd/abcd.jpg");
    }
}
