// [libs/infra/browser/src/http_extractor.rs]
/*!
 * =================================================================
 * APARATO: HTTP EXTRACTOR (V1.0)
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: EXTRACCIÓN POR DEFECTO VÍA ENDPOINT HTTP
 *
 * Adaptador siempre disponible que sustituye al navegador headless real:
 * trata el archive_id como un pase directo a un endpoint de snapshot
 * configurable y clasifica los códigos 4xx/5xx en variantes de
 * ExtractorError. El pipeline solo depende del trait `Extractor`, así
 * que sustituir este adaptador por un driver de navegador real nunca
 * toca la lógica del pipeline.
 * =================================================================
 */

use std::time::Duration;

use adlens_domain_models::ArchiveId;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::types::{RawCreative, RawMedia, RetrievedSnapshot};
use crate::{BrowserSessionFactory, Extractor, ExtractorError};

const DEFAULT_RETRY_AFTER_SECONDS: u64 = 30;

#[derive(Deserialize)]
struct SnapshotDescriptor {
    #[serde(default)]
    screenshot_url: Option<String>,
    #[serde(default)]
    creatives: Vec<CreativeDescriptor>,
}

#[derive(Deserialize)]
struct CreativeDescriptor {
    #[serde(default)]
    body_text: Option<String>,
    #[serde(default)]
    link_url: Option<String>,
    #[serde(default)]
    link_caption: Option<String>,
    #[serde(default)]
    link_title: Option<String>,
    #[serde(default)]
    link_description: Option<String>,
    #[serde(default)]
    link_button_text: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    video_url: Option<String>,
}

pub struct HttpExtractor {
    http: Client,
    base_url: String,
}

impl HttpExtractor {
    pub fn new(base_url: String) -> Self {
        Self {
            http: Client::builder()
                .timeout(Duration::from_secs(60))
                .build()
                .expect("FATAL: HttpExtractor client initialization failed."),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn classify_status(status: StatusCode, retry_after: Option<Duration>) -> ExtractorError {
        match status {
            StatusCode::BAD_REQUEST => ExtractorError::InvalidId,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ExtractorError::IpViolation,
            StatusCode::NOT_FOUND => ExtractorError::NoContentFound,
            StatusCode::GONE => ExtractorError::PermanentlyUnavailable,
            StatusCode::UNPROCESSABLE_ENTITY => ExtractorError::AgeRestricted,
            StatusCode::TOO_MANY_REQUESTS => ExtractorError::TooManyRequests {
                suggested_wait: retry_after
                    .unwrap_or_else(|| Duration::from_secs(DEFAULT_RETRY_AFTER_SECONDS)),
            },
            other if other.is_server_error() => {
                ExtractorError::DriverFault(format!("HTTP_{other}"))
            }
            other => ExtractorError::DriverFault(format!("UNEXPECTED_HTTP_{other}")),
        }
    }

    async fn fetch_bytes(&self, url: &str) -> Result<bytes::Bytes, ExtractorError> {
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(Self::classify_status(response.status(), None));
        }
        Ok(response.bytes().await?)
    }
}

#[async_trait]
impl Extractor for HttpExtractor {
    #[instrument(skip(self))]
    async fn retrieve_ad(&self, archive_id: ArchiveId) -> Result<RetrievedSnapshot, ExtractorError> {
        let target_url = format!("{}/snapshot/{}", self.base_url, archive_id.get());
        let response = self.http.get(&target_url).send().await.map_err(|e| {
            if e.is_timeout() {
                ExtractorError::BrowserTimeout
            } else {
                ExtractorError::Network(e)
            }
        })?;

        if !response.status().is_success() {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse::<u64>().ok())
                .map(Duration::from_secs);
            return Err(Self::classify_status(response.status(), retry_after));
        }

        let descriptor: SnapshotDescriptor = response.json().await?;
        if descriptor.creatives.is_empty() {
            warn!("🕳️ [HTTP_EXTRACTOR]: Archive {} tiene cero creativos.", archive_id);
            return Err(ExtractorError::NoCreatives);
        }

        let screenshot = match descriptor.screenshot_url {
            Some(url) => Some(self.fetch_bytes(&url).await?),
            None => None,
        };

        let mut creatives = Vec::with_capacity(descriptor.creatives.len());
        for raw in descriptor.creatives {
            let image = match raw.image_url {
                Some(url) => {
                    let bytes = self.fetch_bytes(&url).await?;
                    Some(RawMedia { url, bytes })
                }
                None => None,
            };

            creatives.push(RawCreative {
                body_text: raw.body_text,
                link_url: raw.link_url,
                link_caption: raw.link_caption,
                link_title: raw.link_title,
                link_description: raw.link_description,
                link_button_text: raw.link_button_text,
                image,
                video_url: raw.video_url,
            });
        }

        info!("📸 [HTTP_EXTRACTOR]: Archive {} -> {} creativo(s).", archive_id, creatives.len());
        Ok(RetrievedSnapshot { screenshot, creatives })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_status_carries_the_retry_after_hint() {
        let error = HttpExtractor::classify_status(
            StatusCode::TOO_MANY_REQUESTS,
            Some(Duration::from_secs(90)),
        );
        match error {
            ExtractorError::TooManyRequests { suggested_wait } => {
                assert_eq!(suggested_wait, Duration::from_secs(90));
            }
            other => panic!("expected TooManyRequests, got {other:?}"),
        }
    }

    #[test]
    fn rate_limit_status_falls_back_to_the_default_wait() {
        let error = HttpExtractor::classify_status(StatusCode::TOO_MANY_REQUESTS, None);
        match error {
            ExtractorError::TooManyRequests { suggested_wait } => {
                assert_eq!(suggested_wait, Duration::from_secs(DEFAULT_RETRY_AFTER_SECONDS));
            }
            other => panic!("expected TooManyRequests, got {other:?}"),
        }
    }

    #[test]
    fn not_found_maps_to_no_content_found() {
        assert!(matches!(
            HttpExtractor::classify_status(StatusCode::NOT_FOUND, None),
            ExtractorError::NoContentFound
        ));
    }

    #[test]
    fn gone_maps_to_permanently_unavailable() {
        assert!(matches!(
            HttpExtractor::classify_status(StatusCode::GONE, None),
            ExtractorError::PermanentlyUnavailable
        ));
    }

    #[test]
    fn server_error_maps_to_driver_fault() {
        assert!(matches!(
            HttpExtractor::classify_status(StatusCode::BAD_GATEWAY, None),
            ExtractorError::DriverFault(_)
        ));
    }
}

/// Builds a fresh [`HttpExtractor`] per acquisition. Since the default
/// adapter carries no per-session browser state, "acquiring" and
/// "recycling" both just construct a new client pointed at the same
/// endpoint.
pub struct HttpBrowserSessionFactory {
    base_url: String,
}

impl HttpBrowserSessionFactory {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }
}

#[async_trait]
impl BrowserSessionFactory for HttpBrowserSessionFactory {
    async fn acquire(&self) -> Result<Box<dyn Extractor>, ExtractorError> {
        Ok(Box::new(HttpExtractor::new(self.base_url.clone())))
    }
}
