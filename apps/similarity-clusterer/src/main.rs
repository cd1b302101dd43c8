// [apps/similarity-clusterer/src/main.rs]
/*!
 * =================================================================
 * APARATO: SIMILARITY CLUSTERER SHELL (V1.0)
 * CLASIFICACIÓN: APPLICATION LAYER (ENTRY POINT)
 * RESPONSABILIDAD: BOOTSTRAP Y EJECUCIÓN DE UNA PASADA DE CLUSTERING
 *
 * Job por lotes sin contrato de suspensión propio: se conecta, ejecuta
 * ambas pasadas de `run_clustering`, reporta y termina. No hay bucle ni
 * señal de cancelación — una ejecución completa es la unidad de trabajo.
 * =================================================================
 */

use std::path::PathBuf;

use adlens_db::{TursoBatchLeaseClient, TursoClient};
use adlens_sc_lib::{config::ScConfig, run_clustering};
use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    author = "Raz Podesta <metaShark Tech>",
    version = "1.0",
    about = "Similarity Clusterer // clusteriza fingerprints de texto e imagen via union-find."
)]
struct ClustererDirectives {
    /// Ruta al archivo de configuración TOML.
    #[arg(value_name = "CONFIG")]
    config_path: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    adlens_observability::init_tracing("adlens-sc");
    info!("💠 [SHELL]: Similarity Clusterer igniting...");

    let directives = ClustererDirectives::parse();
    let config = ScConfig::load(&directives.config_path)
        .with_context(|| format!("failed to load config from {}", directives.config_path.display()))?;

    let db_client = TursoClient::connect(&config.database.url, config.database.auth_token.clone())
        .await
        .context("database uplink failed")?;
    let db = TursoBatchLeaseClient::new(db_client);

    let report = run_clustering(&db).await.context("clustering pass failed")?;

    info!(
        "🏁 [SHELL]: Clustering complete -> {} text cluster(s), {} image cluster(s).",
        report.text_clusters, report.image_clusters
    );

    Ok(())
}
