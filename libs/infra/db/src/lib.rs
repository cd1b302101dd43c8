// [libs/infra/db/src/lib.rs]
/*!
 * =================================================================
 * APARATO: ADLENS PERSISTENCE CORE (V1.0)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * =================================================================
 */

mod client;
mod errors;
mod repositories;
mod schema;

pub use client::TursoClient;
pub use errors::DbError;
pub use repositories::{BatchLeaseClient, TursoBatchLeaseClient};
