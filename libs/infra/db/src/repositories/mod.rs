// [libs/infra/db/src/repositories/mod.rs]
/*!
 * =================================================================
 * APARATO: BATCH LEASE REPOSITORY (V1.0)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: ARRENDAMIENTO DE LOTES, CREATIVOS Y CLUSTERS
 *
 * La conexión a la base de datos se adquiere por operación lógica
 * (scoped acquisition); ninguna sesión vive a través de un punto de
 * suspensión.
 * =================================================================
 */

mod batches;
mod clusters;
mod creatives;

use std::collections::{HashMap, HashSet};

use adlens_domain_models::{
    ArchiveId, Batch, ClusterAssignment, CreativeRecord, SnapshotMetadataRecord,
};
use async_trait::async_trait;

use crate::client::TursoClient;
use crate::errors::DbError;

/// Thin interface to the relational store, consumed by the creative
/// retrieval pipeline and the similarity clusterer alike.
#[async_trait]
pub trait BatchLeaseClient: Send + Sync {
    async fn lease_batch(&self) -> Result<Option<Batch>, DbError>;
    async fn release_batch(&self, batch_id: i64) -> Result<(), DbError>;
    async fn complete_batch(&self, batch_id: i64) -> Result<(), DbError>;

    async fn upsert_creative_records(&self, records: &[CreativeRecord]) -> Result<(), DbError>;
    async fn upsert_snapshot_metadata(
        &self,
        records: &[SnapshotMetadataRecord],
    ) -> Result<(), DbError>;

    /// Commits a chunk's creative rows and metadata rows atomically, per
    /// the ordering guarantee that both must land in the same
    /// transaction for a given archive id.
    async fn commit_chunk(
        &self,
        creatives: &[CreativeRecord],
        metadata: &[SnapshotMetadataRecord],
    ) -> Result<(), DbError>;

    async fn read_all_text_fingerprints(&self) -> Result<HashMap<i64, HashSet<ArchiveId>>, DbError>;
    async fn read_all_image_fingerprints(
        &self,
    ) -> Result<HashMap<i64, HashSet<ArchiveId>>, DbError>;

    async fn upsert_text_cluster_assignments(
        &self,
        assignments: &[ClusterAssignment],
    ) -> Result<(), DbError>;
    async fn upsert_image_cluster_assignments(
        &self,
        assignments: &[ClusterAssignment],
    ) -> Result<(), DbError>;

    async fn existing_text_cluster_of(&self, archive_id: ArchiveId) -> Result<Option<i64>, DbError>;
    async fn existing_image_cluster_of(
        &self,
        archive_id: ArchiveId,
    ) -> Result<Option<i64>, DbError>;
}

pub struct TursoBatchLeaseClient {
    pub(crate) client: TursoClient,
}

impl TursoBatchLeaseClient {
    pub fn new(client: TursoClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BatchLeaseClient for TursoBatchLeaseClient {
    async fn lease_batch(&self) -> Result<Option<Batch>, DbError> {
        self.lease_batch_impl().await
    }

    async fn release_batch(&self, batch_id: i64) -> Result<(), DbError> {
        self.release_batch_impl(batch_id).await
    }

    async fn complete_batch(&self, batch_id: i64) -> Result<(), DbError> {
        self.complete_batch_impl(batch_id).await
    }

    async fn upsert_creative_records(&self, records: &[CreativeRecord]) -> Result<(), DbError> {
        self.upsert_creative_records_impl(records).await
    }

    async fn upsert_snapshot_metadata(
        &self,
        records: &[SnapshotMetadataRecord],
    ) -> Result<(), DbError> {
        self.upsert_snapshot_metadata_impl(records).await
    }

    async fn commit_chunk(
        &self,
        creatives: &[CreativeRecord],
        metadata: &[SnapshotMetadataRecord],
    ) -> Result<(), DbError> {
        self.commit_chunk_impl(creatives, metadata).await
    }

    async fn read_all_text_fingerprints(&self) -> Result<HashMap<i64, HashSet<ArchiveId>>, DbError> {
        self.read_all_fingerprints_impl("text_sim_hash").await
    }

    async fn read_all_image_fingerprints(
        &self,
    ) -> Result<HashMap<i64, HashSet<ArchiveId>>, DbError> {
        self.read_all_fingerprints_impl("image_sim_hash").await
    }

    async fn upsert_text_cluster_assignments(
        &self,
        assignments: &[ClusterAssignment],
    ) -> Result<(), DbError> {
        self.upsert_cluster_assignments_impl("ad_text_clusters", assignments)
            .await
    }

    async fn upsert_image_cluster_assignments(
        &self,
        assignments: &[ClusterAssignment],
    ) -> Result<(), DbError> {
        self.upsert_cluster_assignments_impl("ad_image_clusters", assignments)
            .await
    }

    async fn existing_text_cluster_of(&self, archive_id: ArchiveId) -> Result<Option<i64>, DbError> {
        self.existing_cluster_of_impl("ad_text_clusters", archive_id)
            .await
    }

    async fn existing_image_cluster_of(
        &self,
        archive_id: ArchiveId,
    ) -> Result<Option<i64>, DbError> {
        self.existing_cluster_of_impl("ad_image_clusters", archive_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use adlens_domain_models::{ClusterAssignment, CreativeRecord, Modality, SnapshotFetchStatus, SnapshotMetadataRecord};
    use chrono::Utc;

    use super::*;
    use crate::client::TursoClient;

    async fn memory_client() -> TursoBatchLeaseClient {
        let client = TursoClient::connect(":memory:", None)
            .await
            .expect("in-memory database should connect");
        TursoBatchLeaseClient::new(client)
    }

    async fn seed_batch(client: &TursoBatchLeaseClient, batch_id: i64, archive_ids: &[i64]) {
        let connection = client.client.get_connection().unwrap();
        connection
            .execute(
                "INSERT INTO fetch_batches (batch_id, archive_ids) VALUES (?1, ?2)",
                libsql::params![batch_id, serde_json::to_string(archive_ids).unwrap()],
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn lease_batch_returns_the_oldest_pending_batch() {
        let client = memory_client().await;
        seed_batch(&client, 1, &[10, 20]).await;
        seed_batch(&client, 2, &[30]).await;

        let leased = client.lease_batch().await.unwrap().expect("a batch should lease");
        assert_eq!(leased.batch_id, 1);
        assert_eq!(leased.archive_ids, vec![ArchiveId(10), ArchiveId(20)]);

        // Already leased: the next call skips it and picks the second batch.
        let second = client.lease_batch().await.unwrap().expect("a second batch should lease");
        assert_eq!(second.batch_id, 2);
    }

    #[tokio::test]
    async fn lease_batch_returns_none_when_nothing_pending() {
        let client = memory_client().await;
        assert!(client.lease_batch().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn release_batch_is_a_noop_once_completed() {
        let client = memory_client().await;
        seed_batch(&client, 1, &[10]).await;
        client.lease_batch().await.unwrap();
        client.complete_batch(1).await.unwrap();
        client.release_batch(1).await.unwrap();

        let connection = client.client.get_connection().unwrap();
        let mut rows = connection
            .query("SELECT status FROM fetch_batches WHERE batch_id = 1", ())
            .await
            .unwrap();
        let status: String = rows.next().await.unwrap().unwrap().get(0).unwrap();
        assert_eq!(status, "completed");
    }

    #[tokio::test]
    async fn commit_chunk_persists_creatives_and_metadata_together() {
        let client = memory_client().await;
        let mut record = CreativeRecord::new(ArchiveId(1));
        record.text_sha256 = Some("abc".into());
        let metadata = SnapshotMetadataRecord {
            archive_id: ArchiveId(1),
            fetch_time: Utc::now(),
            fetch_status: SnapshotFetchStatus::Success,
        };

        client
            .commit_chunk(&[record], &[metadata])
            .await
            .expect("chunk should commit atomically");

        let fingerprints = client.read_all_text_fingerprints().await.unwrap();
        assert!(fingerprints.is_empty(), "text_sim_hash was never set for this record");
    }

    #[tokio::test]
    async fn cluster_assignments_round_trip() {
        let client = memory_client().await;
        let assignment = ClusterAssignment {
            archive_id: ArchiveId(7),
            cluster_id: 42,
            modality: Modality::Text,
        };
        client
            .upsert_text_cluster_assignments(&[assignment])
            .await
            .unwrap();

        let cluster_id = client.existing_text_cluster_of(ArchiveId(7)).await.unwrap();
        assert_eq!(cluster_id, Some(42));
        assert_eq!(client.existing_image_cluster_of(ArchiveId(7)).await.unwrap(), None);
    }
}
