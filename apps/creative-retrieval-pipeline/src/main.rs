// [apps/creative-retrieval-pipeline/src/main.rs]
/*!
 * =================================================================
 * APARATO: CREATIVE RETRIEVAL PIPELINE SHELL (V1.0)
 * CLASIFICACIÓN: APPLICATION LAYER (ENTRY POINT)
 * RESPONSABILIDAD: BOOTSTRAP DE ENTORNO E IGNICIÓN DEL PIPELINE
 * =================================================================
 */

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use adlens_browser::HttpBrowserSessionFactory;
use adlens_crp_lib::{config::CrpConfig, pipeline::CreativeRetrievalPipeline};
use adlens_db::{TursoBatchLeaseClient, TursoClient};
use adlens_notification::{NullNotifier, SlackNotifier};
use adlens_object_store::HttpObjectStoreClient;
use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

/// Directivas de mando del worker de extracción.
#[derive(Parser, Debug)]
#[command(
    author = "Raz Podesta <metaShark Tech>",
    version = "1.0",
    about = "Creative Retrieval Pipeline // arrienda lotes, extrae creativos, hashea y sube media."
)]
struct PipelineDirectives {
    /// Ruta al archivo de configuración TOML.
    #[arg(value_name = "CONFIG")]
    config_path: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    adlens_observability::init_tracing("adlens-crp");
    info!("💠 [SHELL]: Creative Retrieval Pipeline igniting...");

    let directives = PipelineDirectives::parse();
    let config = CrpConfig::load(&directives.config_path)
        .with_context(|| format!("failed to load config from {}", directives.config_path.display()))?;

    let db_client = TursoClient::connect(&config.database.url, config.database.auth_token.clone())
        .await
        .context("database uplink failed")?;
    let db: Arc<dyn adlens_db::BatchLeaseClient> = Arc::new(TursoBatchLeaseClient::new(db_client));

    let browser_factory: Arc<dyn adlens_browser::BrowserSessionFactory> =
        Arc::new(HttpBrowserSessionFactory::new(config.browser.endpoint.clone()));

    let object_store: Arc<dyn adlens_object_store::ObjectStoreClient> =
        Arc::new(HttpObjectStoreClient::new(config.object_store.endpoint.clone()));

    let notifier: Arc<dyn adlens_notification::Notifier> = match &config.logging.slack_url {
        Some(url) => Arc::new(SlackNotifier::new(url.clone(), config.logging.slack_user_id_to_include.clone())),
        None => {
            warn!("⚠️ [SHELL]: No Slack webhook configured; alerts will be discarded.");
            Arc::new(NullNotifier)
        }
    };

    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_signal = Arc::clone(&shutdown);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("⚠️ [SIGNAL]: Termination requested by host. Draining current chunk...");
            shutdown_signal.store(true, Ordering::SeqCst);
        }
    });

    let mut pipeline = CreativeRetrievalPipeline::new(config, db, browser_factory, object_store, notifier)
        .await
        .context("pipeline initialization failed")?;

    info!("🚀 [SHELL]: Handing control to CreativeRetrievalPipeline.");
    pipeline.run(shutdown).await?;

    info!("🏁 [SHELL]: Shutdown sequence concluded.");
    Ok(())
}
