// [libs/infra/browser/src/types.rs]
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Raw binary payload plus the URL it was fetched from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMedia {
    pub url: String,
    #[serde(skip)]
    pub bytes: Bytes,
}

/// One creative exactly as extracted, before any hashing or upload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCreative {
    pub body_text: Option<String>,
    pub link_url: Option<String>,
    pub link_caption: Option<String>,
    pub link_title: Option<String>,
    pub link_description: Option<String>,
    pub link_button_text: Option<String>,
    #[serde(skip)]
    pub image: Option<RawMedia>,
    pub video_url: Option<String>,
}

/// Everything extracted for one archive id in a single session visit.
#[derive(Debug, Clone, Default)]
pub struct RetrievedSnapshot {
    pub screenshot: Option<Bytes>,
    pub creatives: Vec<RawCreative>,
}
