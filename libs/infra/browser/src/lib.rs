// [libs/infra/browser/src/lib.rs]
/*!
 * =================================================================
 * APARATO: BROWSER SESSION ADAPTER (V1.0)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: EXTRACCIÓN DE CREATIVOS DESDE SESIONES DE NAVEGADOR
 * =================================================================
 */

mod errors;
mod http_extractor;
mod session;
mod types;

pub use errors::ExtractorError;
pub use http_extractor::{HttpBrowserSessionFactory, HttpExtractor};
pub use session::ScopedBrowserSession;
pub use types::{RawCreative, RawMedia, RetrievedSnapshot};

use adlens_domain_models::ArchiveId;
use async_trait::async_trait;

/// One live extraction session. The real driver (headless browser +
/// creative-extraction library) is out of scope; this is the seam it
/// plugs into.
#[async_trait]
pub trait Extractor: Send + Sync {
    async fn retrieve_ad(&self, archive_id: ArchiveId) -> Result<RetrievedSnapshot, ExtractorError>;
}

/// Builds fresh `Extractor` sessions on demand, so a stalled or
/// rate-limited session can be torn down and replaced.
#[async_trait]
pub trait BrowserSessionFactory: Send + Sync {
    async fn acquire(&self) -> Result<Box<dyn Extractor>, ExtractorError>;
}
