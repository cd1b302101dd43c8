// [libs/infra/object-store/src/lib.rs]
/*!
 * =================================================================
 * APARATO: OBJECT STORE UPLINK (V1.0)
 * CLASIFICACIÓN: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: SUBIDA IDEMPOTENTE DE BLOBS A LOS BUCKETS DE CREATIVOS
 * =================================================================
 */

mod client;
mod errors;
mod paths;

pub use client::{Bucket, HttpObjectStoreClient, ObjectStoreClient};
pub use errors::ObjectStoreError;
pub use paths::{image_path, screenshot_path, video_path};
