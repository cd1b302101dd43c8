// [apps/creative-retrieval-pipeline/src/lib.rs]
/*!
 * =================================================================
 * APARATO: CREATIVE RETRIEVAL PIPELINE LIBRARY (V1.0)
 * CLASIFICACIÓN: APPLICATION LAYER (ESTRATO L5)
 * =================================================================
 */

pub mod config;
pub mod pipeline;

pub use config::CrpConfig;
pub use pipeline::{CreativeRetrievalPipeline, PipelineError};
