// [libs/infra/db/src/repositories/batches.rs]
/*!
 * =================================================================
 * APARATO: FETCH BATCH LEASING (V1.0)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: CICLO DE VIDA DE ARRENDAMIENTO DE LOTES
 *
 * La recuperación de lotes abandonados (zombies) se intenta primero,
 * antes de expandir hacia un lote nuevo en estado 'pending'. Liberar o
 * completar un lote ya en estado terminal es un no-op: nunca resucita
 * un lote completado.
 * =================================================================
 */

use adlens_domain_models::{ArchiveId, Batch};
use chrono::{Duration, Utc};
use libsql::params;
use tracing::{info, instrument, warn};

use super::TursoBatchLeaseClient;
use crate::errors::DbError;

/// Umbral de inactividad permitido antes de reclamar un lote arrendado como zombie.
const ZOMBIE_LEASE_THRESHOLD_MINUTES: i64 = 15;

const FIND_RECOVERABLE_BATCH: &str = r#"
    SELECT batch_id, archive_ids
    FROM fetch_batches
    WHERE status = 'leased' AND leased_at < ?1
    ORDER BY leased_at ASC
    LIMIT 1
"#;

const RECLAIM_BATCH: &str = r#"
    UPDATE fetch_batches
    SET leased_at = CURRENT_TIMESTAMP
    WHERE batch_id = ?1
"#;

const FIND_PENDING_BATCH: &str = r#"
    SELECT batch_id, archive_ids
    FROM fetch_batches
    WHERE status = 'pending'
    ORDER BY batch_id ASC
    LIMIT 1
"#;

const LEASE_BATCH: &str = r#"
    UPDATE fetch_batches
    SET status = 'leased', leased_at = CURRENT_TIMESTAMP
    WHERE batch_id = ?1 AND status = 'pending'
"#;

const RELEASE_BATCH: &str = r#"
    UPDATE fetch_batches
    SET status = 'pending', leased_at = NULL
    WHERE batch_id = ?1 AND status != 'completed'
"#;

const COMPLETE_BATCH: &str = r#"
    UPDATE fetch_batches
    SET status = 'completed'
    WHERE batch_id = ?1 AND status != 'completed'
"#;

impl TursoBatchLeaseClient {
    #[instrument(skip(self))]
    pub(crate) async fn lease_batch_impl(&self) -> Result<Option<Batch>, DbError> {
        let connection = self.client.get_connection()?;
        let expiration_threshold = Utc::now() - Duration::minutes(ZOMBIE_LEASE_THRESHOLD_MINUTES);

        let transaction = connection
            .transaction()
            .await
            .map_err(|_| DbError::TransactionError)?;

        // FASE 1: recuperación de lotes abandonados.
        let mut recoverable = transaction
            .query(
                FIND_RECOVERABLE_BATCH,
                params![expiration_threshold.to_rfc3339()],
            )
            .await?;

        if let Some(row) = recoverable.next().await? {
            let batch_id: i64 = row.get(0)?;
            let archive_ids_json: String = row.get(1)?;

            transaction
                .execute(RECLAIM_BATCH, params![batch_id])
                .await?;
            transaction
                .commit()
                .await
                .map_err(|_| DbError::TransactionError)?;

            info!("♻️ [BATCH_RECOVERY]: Lote zombie [{}] reclamado.", batch_id);
            return Ok(Some(Self::map_batch(batch_id, &archive_ids_json)?));
        }

        // FASE 2: arrendamiento de un lote pendiente.
        let mut pending = transaction.query(FIND_PENDING_BATCH, ()).await?;
        let Some(row) = pending.next().await? else {
            transaction
                .commit()
                .await
                .map_err(|_| DbError::TransactionError)?;
            return Ok(None);
        };

        let batch_id: i64 = row.get(0)?;
        let archive_ids_json: String = row.get(1)?;

        let affected = transaction.execute(LEASE_BATCH, params![batch_id]).await?;
        if affected == 0 {
            // Otro proceso ganó la carrera por este lote.
            transaction
                .commit()
                .await
                .map_err(|_| DbError::TransactionError)?;
            warn!("⚠️ [BATCH_RACE]: Lote [{}] arrendado por otro proceso.", batch_id);
            return Ok(None);
        }

        transaction
            .commit()
            .await
            .map_err(|_| DbError::TransactionError)?;

        info!("✨ [BATCH_LEASE]: Lote [{}] arrendado.", batch_id);
        Ok(Some(Self::map_batch(batch_id, &archive_ids_json)?))
    }

    #[instrument(skip(self))]
    pub(crate) async fn release_batch_impl(&self, batch_id: i64) -> Result<(), DbError> {
        let connection = self.client.get_connection()?;
        let affected = connection.execute(RELEASE_BATCH, params![batch_id]).await?;
        if affected == 0 {
            warn!(
                "⚠️ [BATCH_RELEASE_NOOP]: Lote [{}] ya estaba completado o no existe.",
                batch_id
            );
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub(crate) async fn complete_batch_impl(&self, batch_id: i64) -> Result<(), DbError> {
        let connection = self.client.get_connection()?;
        let affected = connection.execute(COMPLETE_BATCH, params![batch_id]).await?;
        if affected == 0 {
            warn!(
                "⚠️ [BATCH_COMPLETE_NOOP]: Lote [{}] ya estaba completado o no existe.",
                batch_id
            );
        }
        Ok(())
    }

    fn map_batch(batch_id: i64, archive_ids_json: &str) -> Result<Batch, DbError> {
        let raw_ids: Vec<i64> = serde_json::from_str(archive_ids_json)
            .map_err(|e| DbError::MappingError(format!("archive_ids decode failed: {e}")))?;
        Ok(Batch {
            batch_id,
            archive_ids: raw_ids.into_iter().map(ArchiveId::from).collect(),
        })
    }
}
