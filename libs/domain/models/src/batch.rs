// [libs/domain/models/src/batch.rs]
use serde::{Deserialize, Serialize};

use crate::ArchiveId;

/// A leased unit of work: a batch id and the archive ids it covers. Leased
/// by exactly one worker at a time; its terminal state (`completed` or
/// `released`) is set exactly once by the batch-leasing client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    pub batch_id: i64,
    pub archive_ids: Vec<ArchiveId>,
}

impl Batch {
    pub fn new(batch_id: i64, archive_ids: Vec<ArchiveId>) -> Self {
        Self {
            batch_id,
            archive_ids,
        }
    }

    /// Splits the batch into commit-sized chunks of at most `chunk_size`
    /// archive ids, preserving order.
    pub fn chunks(&self, chunk_size: usize) -> impl Iterator<Item = &[ArchiveId]> {
        self.archive_ids.chunks(chunk_size.max(1))
    }
}
