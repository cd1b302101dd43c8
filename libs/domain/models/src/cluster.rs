// [libs/domain/models/src/cluster.rs]
use serde::{Deserialize, Serialize};

use crate::ArchiveId;

/// Which fingerprint space a `ClusterAssignment` was produced from. Each
/// archive id carries one assignment per modality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Modality {
    Text,
    Image,
}

/// `(archive_id, cluster_id)`, one per modality, upserted wholesale per
/// clustering run. Cluster ids are only stable within a single run; see
/// the clusterer's notes on cross-run renumbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterAssignment {
    pub archive_id: ArchiveId,
    pub cluster_id: i64,
    pub modality: Modality,
}
