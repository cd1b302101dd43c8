// [libs/domain/models/src/creative.rs]
use serde::{Deserialize, Serialize};

use crate::ArchiveId;

/// The four-tuple that determines row uniqueness in the store, with `None`
/// treated as a distinguishable value rather than folded into a single
/// "empty" bucket. Two creatives for the same archive id with identical
/// hashes collapse to one row; two archive ids sharing identical hashes do
/// not.
pub type CreativeKey = (i64, Option<String>, Option<String>, Option<String>);

/// Per-extracted-creative result row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreativeRecord {
    pub archive_id: ArchiveId,
    pub body_text: Option<String>,
    pub body_language: Option<String>,
    pub link_url: Option<String>,
    pub link_caption: Option<String>,
    pub link_title: Option<String>,
    pub link_description: Option<String>,
    pub link_button_text: Option<String>,
    pub text_sha256: Option<String>,
    pub text_sim_hash: Option<String>,
    pub image_downloaded_url: Option<String>,
    pub image_sha256: Option<String>,
    pub image_sim_hash: Option<String>,
    pub image_bucket_path: Option<String>,
    pub video_downloaded_url: Option<String>,
    pub video_sha256: Option<String>,
    pub video_bucket_path: Option<String>,
}

impl CreativeRecord {
    pub fn new(archive_id: ArchiveId) -> Self {
        Self {
            archive_id,
            ..Default::default()
        }
    }

    /// The `(archive_id, text_sha256, image_sha256, video_sha256)` tuple
    /// used to drop duplicate creatives within a chunk before emission.
    pub fn unique_key(&self) -> CreativeKey {
        (
            self.archive_id.get(),
            self.text_sha256.clone(),
            self.image_sha256.clone(),
            self.video_sha256.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_key_distinguishes_by_archive_id_when_hashes_match() {
        let mut a = CreativeRecord::new(ArchiveId(1));
        a.text_sha256 = Some("deadbeef".to_string());
        let mut b = CreativeRecord::new(ArchiveId(2));
        b.text_sha256 = Some("deadbeef".to_string());

        assert_ne!(a.unique_key(), b.unique_key());
    }

    #[test]
    fn unique_key_treats_none_as_distinguishable() {
        let a = CreativeRecord::new(ArchiveId(1));
        let mut b = CreativeRecord::new(ArchiveId(1));
        b.text_sha256 = Some("".to_string());

        assert_ne!(a.unique_key(), b.unique_key());
    }

    #[test]
    fn unique_key_is_equal_for_a_repeated_identical_creative() {
        let mut a = CreativeRecord::new(ArchiveId(1));
        a.image_sha256 = Some("abc123".to_string());
        let b = a.clone();

        assert_eq!(a.unique_key(), b.unique_key());
    }
}
