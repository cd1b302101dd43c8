// [libs/infra/object-store/src/errors.rs]
//! =================================================================
//! APARATO: OBJECT STORE ERRORS (V1.0)
//! RESPONSABILIDAD: CATALOGACIÓN DE FALLOS DE SUBIDA
//! =================================================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ObjectStoreError {
    #[error("UPLINK_UNREACHABLE: transient transport failure after retries: {0}")]
    NetworkFault(#[from] reqwest::Error),

    #[error("UPLOAD_REJECTED: object store returned status {0}")]
    ServerRejection(String),
}
