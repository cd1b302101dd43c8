// [libs/infra/db/src/repositories/creatives.rs]
/*!
 * =================================================================
 * APARATO: CREATIVE & SNAPSHOT METADATA LEDGER (V1.0)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: PERSISTENCIA IDEMPOTENTE DE CREATIVOS Y METADATOS
 *
 * El upsert de un creativo y el upsert de su metadato de snapshot para
 * el mismo archive_id deben confirmarse en la misma transacción.
 * =================================================================
 */

use adlens_domain_models::{CreativeRecord, SnapshotMetadataRecord};
use libsql::{params, Transaction};
use tracing::{debug, instrument};

use super::TursoBatchLeaseClient;
use crate::errors::DbError;

const UPSERT_CREATIVE: &str = r#"
    INSERT INTO ad_creatives (
        archive_id, body_text, body_language,
        link_url, link_caption, link_title, link_description, link_button_text,
        text_sha256, text_sim_hash,
        image_downloaded_url, image_sha256, image_sim_hash, image_bucket_path,
        video_downloaded_url, video_sha256, video_bucket_path
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)
    ON CONFLICT(archive_id, text_sha256, image_sha256, video_sha256) DO UPDATE SET
        body_text = excluded.body_text,
        body_language = excluded.body_language,
        link_url = excluded.link_url,
        link_caption = excluded.link_caption,
        link_title = excluded.link_title,
        link_description = excluded.link_description,
        link_button_text = excluded.link_button_text,
        text_sim_hash = excluded.text_sim_hash,
        image_downloaded_url = excluded.image_downloaded_url,
        image_sim_hash = excluded.image_sim_hash,
        image_bucket_path = excluded.image_bucket_path,
        video_downloaded_url = excluded.video_downloaded_url,
        video_bucket_path = excluded.video_bucket_path
"#;

const UPSERT_SNAPSHOT_METADATA: &str = r#"
    INSERT INTO ad_snapshot_metadata (archive_id, fetch_time, fetch_status)
    VALUES (?1, ?2, ?3)
"#;

impl TursoBatchLeaseClient {
    #[instrument(skip(self, records))]
    pub(crate) async fn upsert_creative_records_impl(
        &self,
        records: &[CreativeRecord],
    ) -> Result<(), DbError> {
        let connection = self.client.get_connection()?;
        let transaction = connection
            .transaction()
            .await
            .map_err(|_| DbError::TransactionError)?;
        for record in records {
            Self::insert_creative(&transaction, record).await?;
        }
        transaction
            .commit()
            .await
            .map_err(|_| DbError::TransactionError)?;
        debug!("💾 [CREATIVES]: {} fila(s) sincronizadas.", records.len());
        Ok(())
    }

    #[instrument(skip(self, records))]
    pub(crate) async fn upsert_snapshot_metadata_impl(
        &self,
        records: &[SnapshotMetadataRecord],
    ) -> Result<(), DbError> {
        let connection = self.client.get_connection()?;
        let transaction = connection
            .transaction()
            .await
            .map_err(|_| DbError::TransactionError)?;
        for record in records {
            Self::insert_snapshot_metadata(&transaction, record).await?;
        }
        transaction
            .commit()
            .await
            .map_err(|_| DbError::TransactionError)?;
        Ok(())
    }

    #[instrument(skip(self, creatives, metadata))]
    pub(crate) async fn commit_chunk_impl(
        &self,
        creatives: &[CreativeRecord],
        metadata: &[SnapshotMetadataRecord],
    ) -> Result<(), DbError> {
        let connection = self.client.get_connection()?;
        let transaction = connection
            .transaction()
            .await
            .map_err(|_| DbError::TransactionError)?;

        for record in creatives {
            Self::insert_creative(&transaction, record).await?;
        }
        for record in metadata {
            Self::insert_snapshot_metadata(&transaction, record).await?;
        }

        transaction
            .commit()
            .await
            .map_err(|_| DbError::TransactionError)?;

        debug!(
            "✅ [CHUNK_COMMIT]: {} creativo(s), {} metadato(s) confirmados atómicamente.",
            creatives.len(),
            metadata.len()
        );
        Ok(())
    }

    async fn insert_creative(transaction: &Transaction, record: &CreativeRecord) -> Result<(), DbError> {
        transaction
            .execute(
                UPSERT_CREATIVE,
                params![
                    record.archive_id.get(),
                    record.body_text.clone(),
                    record.body_language.clone(),
                    record.link_url.clone(),
                    record.link_caption.clone(),
                    record.link_title.clone(),
                    record.link_description.clone(),
                    record.link_button_text.clone(),
                    record.text_sha256.clone(),
                    record.text_sim_hash.clone(),
                    record.image_downloaded_url.clone(),
                    record.image_sha256.clone(),
                    record.image_sim_hash.clone(),
                    record.image_bucket_path.clone(),
                    record.video_downloaded_url.clone(),
                    record.video_sha256.clone(),
                    record.video_bucket_path.clone(),
                ],
            )
            .await?;
        Ok(())
    }

    async fn insert_snapshot_metadata(
        transaction: &Transaction,
        record: &SnapshotMetadataRecord,
    ) -> Result<(), DbError> {
        transaction
            .execute(
                UPSERT_SNAPSHOT_METADATA,
                params![
                    record.archive_id.get(),
                    record.fetch_time.to_rfc3339(),
                    record.fetch_status.code(),
                ],
            )
            .await?;
        Ok(())
    }
}
