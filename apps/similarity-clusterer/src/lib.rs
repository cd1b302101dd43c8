// [apps/similarity-clusterer/src/lib.rs]
/*!
 * =================================================================
 * APARATO: SIMILARITY CLUSTERER LIBRARY (V1.0)
 * CLASIFICACIÓN: APPLICATION LAYER (ESTRATO L5)
 * =================================================================
 */

pub mod clusterer;
pub mod config;

pub use clusterer::{run_clustering, ClusteringReport, ClustererError};
pub use config::ScConfig;
