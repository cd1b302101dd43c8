// [apps/creative-retrieval-pipeline/src/config.rs]
//! TOML configuration for the creative retrieval pipeline, loaded from the
//! single positional path the CLI takes. Unrecognized keys are ignored
//! (forward compatible); every field below has a default matching
//! `spec.md` §6/§8 except the ones with no sensible default (database and
//! browser endpoints).

use std::path::Path;

use serde::Deserialize;

fn default_batch_size() -> usize {
    20
}

fn default_max_video_download_size() -> u64 {
    512_000_000
}

fn default_browser_recycle_threshold() -> u64 {
    2000
}

fn default_rate_limit_wait_secs() -> u64 {
    4 * 3600
}

fn default_poll_interval_when_empty_secs() -> u64 {
    3600
}

#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_max_video_download_size")]
    pub max_video_download_size: u64,
    #[serde(default = "default_browser_recycle_threshold")]
    pub browser_recycle_threshold: u64,
    #[serde(default = "default_rate_limit_wait_secs")]
    pub rate_limit_default_wait_secs: u64,
    #[serde(default = "default_poll_interval_when_empty_secs")]
    pub poll_interval_when_empty_secs: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            max_video_download_size: default_max_video_download_size(),
            browser_recycle_threshold: default_browser_recycle_threshold(),
            rate_limit_default_wait_secs: default_rate_limit_wait_secs(),
            poll_interval_when_empty_secs: default_poll_interval_when_empty_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    pub slack_url: Option<String>,
    pub slack_user_id_to_include: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub auth_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BrowserConfig {
    pub endpoint: String,
}

fn default_object_store_endpoint() -> String {
    "http://localhost:9000".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectStoreConfig {
    #[serde(default = "default_object_store_endpoint")]
    pub endpoint: String,
}

impl Default for ObjectStoreConfig {
    fn default() -> Self {
        Self {
            endpoint: default_object_store_endpoint(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CrpConfig {
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    pub database: DatabaseConfig,
    pub browser: BrowserConfig,
    #[serde(default)]
    pub object_store: ObjectStoreConfig,
}

impl CrpConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("failed to parse config file {}: {e}", path.display()))?;
        Ok(config)
    }
}
