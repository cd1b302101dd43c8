// [libs/domain/models/src/lib.rs]
/*!
 * =================================================================
 * APARATO: AD-CREATIVE DOMAIN MODELS (V1.0)
 * CLASIFICACIÓN: DOMAIN MODELS (ESTRATO L2)
 * RESPONSABILIDAD: CONTRATOS SOBERANOS DE CREATIVO, LOTE Y CLUSTER
 * =================================================================
 */

mod archive_id;
mod batch;
mod cluster;
mod creative;
mod snapshot;
mod stats;

pub use archive_id::ArchiveId;
pub use batch::Batch;
pub use cluster::{ClusterAssignment, Modality};
pub use creative::{CreativeKey, CreativeRecord};
pub use snapshot::{SnapshotFetchStatus, SnapshotMetadataRecord};
pub use stats::PipelineStats;
