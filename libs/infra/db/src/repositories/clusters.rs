// [libs/infra/db/src/repositories/clusters.rs]
/*!
 * =================================================================
 * APARATO: FINGERPRINT & CLUSTER LEDGER (V1.0)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: LECTURA DE HUELLAS Y PERSISTENCIA DE CLUSTERS
 *
 * Las huellas exactamente iguales se agrupan en el mismo bucket antes de
 * alcanzar al motor de similitud; el bit pattern de 64 bits se reinterpreta
 * como i64 para su almacenamiento en el mapa.
 * =================================================================
 */

use std::collections::{HashMap, HashSet};

use adlens_domain_models::{ArchiveId, ClusterAssignment};
use libsql::params;
use tracing::{debug, instrument};

use super::TursoBatchLeaseClient;
use crate::errors::DbError;

const UPSERT_TEXT_CLUSTER: &str = r#"
    INSERT INTO ad_text_clusters (archive_id, cluster_id)
    VALUES (?1, ?2)
    ON CONFLICT(archive_id) DO UPDATE SET cluster_id = excluded.cluster_id
"#;

const UPSERT_IMAGE_CLUSTER: &str = r#"
    INSERT INTO ad_image_clusters (archive_id, cluster_id)
    VALUES (?1, ?2)
    ON CONFLICT(archive_id) DO UPDATE SET cluster_id = excluded.cluster_id
"#;

impl TursoBatchLeaseClient {
    #[instrument(skip(self))]
    pub(crate) async fn read_all_fingerprints_impl(
        &self,
        hash_column: &str,
    ) -> Result<HashMap<i64, HashSet<ArchiveId>>, DbError> {
        let connection = self.client.get_connection()?;
        let query = format!(
            "SELECT archive_id, {hash_column} FROM ad_creatives WHERE {hash_column} IS NOT NULL"
        );

        let mut rows = connection.query(&query, ()).await?;
        let mut fingerprints: HashMap<i64, HashSet<ArchiveId>> = HashMap::new();

        while let Some(row) = rows.next().await? {
            let archive_id: i64 = row.get(0)?;
            let hash_hex: String = row.get(1)?;
            let hash_value = u64::from_str_radix(&hash_hex, 16)
                .map_err(|e| DbError::MappingError(format!("fingerprint decode failed: {e}")))?;
            fingerprints
                .entry(hash_value as i64)
                .or_default()
                .insert(ArchiveId::from(archive_id));
        }

        debug!(
            "📡 [FINGERPRINTS]: {} huella(s) única(s) leídas de {}.",
            fingerprints.len(),
            hash_column
        );
        Ok(fingerprints)
    }

    #[instrument(skip(self, assignments))]
    pub(crate) async fn upsert_cluster_assignments_impl(
        &self,
        table: &str,
        assignments: &[ClusterAssignment],
    ) -> Result<(), DbError> {
        let connection = self.client.get_connection()?;
        let transaction = connection
            .transaction()
            .await
            .map_err(|_| DbError::TransactionError)?;

        let sql = match table {
            "ad_text_clusters" => UPSERT_TEXT_CLUSTER,
            "ad_image_clusters" => UPSERT_IMAGE_CLUSTER,
            other => {
                return Err(DbError::MappingError(format!(
                    "unknown cluster table: {other}"
                )))
            }
        };

        for assignment in assignments {
            transaction
                .execute(sql, params![assignment.archive_id.get(), assignment.cluster_id])
                .await?;
        }

        transaction
            .commit()
            .await
            .map_err(|_| DbError::TransactionError)?;

        debug!("🧬 [CLUSTERS]: {} asignación(es) sincronizadas en {}.", assignments.len(), table);
        Ok(())
    }

    #[instrument(skip(self))]
    pub(crate) async fn existing_cluster_of_impl(
        &self,
        table: &str,
        archive_id: ArchiveId,
    ) -> Result<Option<i64>, DbError> {
        let connection = self.client.get_connection()?;
        let query = format!("SELECT cluster_id FROM {table} WHERE archive_id = ?1");
        let mut rows = connection.query(&query, params![archive_id.get()]).await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }
}
