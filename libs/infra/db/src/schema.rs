// [libs/infra/db/src/schema.rs]
/*!
 * =================================================================
 * APARATO: AD-CREATIVE DATABASE SCHEMA (V1.0)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: GOBERNANZA ESTRUCTURAL E IDEMPOTENCIA TOTAL
 * =================================================================
 */

use anyhow::{Context, Result};
use libsql::Connection;
use tracing::{debug, info, instrument};

const TACTICAL_TABLES: &[(&str, &str)] = &[
    ("TABLE_FETCH_BATCHES", r#"
        CREATE TABLE IF NOT EXISTS fetch_batches (
            batch_id INTEGER PRIMARY KEY,
            archive_ids TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'pending',
            leased_at DATETIME,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        );
    "#),
    ("TABLE_AD_CREATIVES", r#"
        CREATE TABLE IF NOT EXISTS ad_creatives (
            archive_id INTEGER NOT NULL,
            body_text TEXT,
            body_language TEXT,
            link_url TEXT,
            link_caption TEXT,
            link_title TEXT,
            link_description TEXT,
            link_button_text TEXT,
            text_sha256 TEXT,
            text_sim_hash TEXT,
            image_downloaded_url TEXT,
            image_sha256 TEXT,
            image_sim_hash TEXT,
            image_bucket_path TEXT,
            video_downloaded_url TEXT,
            video_sha256 TEXT,
            video_bucket_path TEXT,
            UNIQUE(archive_id, text_sha256, image_sha256, video_sha256)
        );
    "#),
    ("TABLE_AD_SNAPSHOT_METADATA", r#"
        CREATE TABLE IF NOT EXISTS ad_snapshot_metadata (
            archive_id INTEGER NOT NULL,
            fetch_time DATETIME NOT NULL,
            fetch_status INTEGER NOT NULL
        );
    "#),
    ("TABLE_AD_TEXT_CLUSTERS", r#"
        CREATE TABLE IF NOT EXISTS ad_text_clusters (
            archive_id INTEGER PRIMARY KEY,
            cluster_id INTEGER NOT NULL
        );
    "#),
    ("TABLE_AD_IMAGE_CLUSTERS", r#"
        CREATE TABLE IF NOT EXISTS ad_image_clusters (
            archive_id INTEGER PRIMARY KEY,
            cluster_id INTEGER NOT NULL
        );
    "#),
];

const ACCELERATION_INDEXES: &[(&str, &str)] = &[
    ("IDX_FETCH_BATCHES_STATUS", "CREATE INDEX IF NOT EXISTS idx_fetch_batches_status ON fetch_batches(status);"),
    ("IDX_AD_CREATIVES_ARCHIVE", "CREATE INDEX IF NOT EXISTS idx_ad_creatives_archive ON ad_creatives(archive_id);"),
    ("IDX_AD_SNAPSHOT_ARCHIVE", "CREATE INDEX IF NOT EXISTS idx_ad_snapshot_archive ON ad_snapshot_metadata(archive_id);"),
    ("IDX_AD_CREATIVES_TEXT_SIM_HASH", "CREATE INDEX IF NOT EXISTS idx_ad_creatives_text_sim_hash ON ad_creatives(text_sim_hash);"),
    ("IDX_AD_CREATIVES_IMAGE_SIM_HASH", "CREATE INDEX IF NOT EXISTS idx_ad_creatives_image_sim_hash ON ad_creatives(image_sim_hash);"),
];

#[instrument(skip(database_connection))]
pub async fn apply_full_schema(database_connection: &Connection) -> Result<()> {
    info!("🏗️ [SCHEMA_ENGINE]: Initiating structural synchronization...");

    for (identifier, sql) in TACTICAL_TABLES {
        debug!("  ↳ Solidifying: {}", identifier);
        database_connection
            .execute(sql, ())
            .await
            .with_context(|| format!("CRITICAL_SOLIDIFICATION_FAULT: {}", identifier))?;
    }

    for (identifier, sql) in ACCELERATION_INDEXES {
        debug!("  ↳ Hardening: {}", identifier);
        database_connection
            .execute(sql, ())
            .await
            .with_context(|| format!("CRITICAL_HARDENING_FAULT: {}", identifier))?;
    }

    info!("✅ [SCHEMA_ENGINE]: Ad-creative ledger level and certified.");
    Ok(())
}
