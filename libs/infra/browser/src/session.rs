// [libs/infra/browser/src/session.rs]
/*!
 * =================================================================
 * APARATO: SCOPED BROWSER SESSION (V1.0)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: CICLO DE VIDA DE SESIONES DE EXTRACCIÓN
 *
 * El reciclaje de una sesión es teardown-then-rebuild: no existe un
 * generador con estado suspendido que recuperar, solo una nueva sesión
 * construida por la fábrica.
 * =================================================================
 */

use std::sync::Arc;

use tracing::{info, instrument};

use crate::{BrowserSessionFactory, Extractor, ExtractorError};

/// Owned handle to a live `Extractor`. Holds the factory so it can rebuild
/// itself on `recycle()` without the caller needing to track construction
/// details.
pub struct ScopedBrowserSession {
    factory: Arc<dyn BrowserSessionFactory>,
    extractor: Option<Box<dyn Extractor>>,
}

impl ScopedBrowserSession {
    pub async fn acquire(factory: Arc<dyn BrowserSessionFactory>) -> Result<Self, ExtractorError> {
        let extractor = factory.acquire().await?;
        Ok(Self {
            factory,
            extractor: Some(extractor),
        })
    }

    pub fn extractor(&self) -> &dyn Extractor {
        self.extractor
            .as_deref()
            .expect("ScopedBrowserSession used after close()")
    }

    /// Tears down the current session and builds a fresh one in its place.
    #[instrument(skip(self))]
    pub async fn recycle(&mut self) -> Result<(), ExtractorError> {
        self.close();
        info!("🔄 [BROWSER_SESSION]: Reciclando sesión de extracción.");
        self.extractor = Some(self.factory.acquire().await?);
        Ok(())
    }

    /// Drops the held extractor. Safe to call more than once; every exit
    /// path from the pipeline's per-archive-id loop calls this explicitly
    /// in addition to the `Drop` impl below, so a panic mid-extraction
    /// still releases the underlying resource.
    pub fn close(&mut self) {
        self.extractor = None;
    }
}

impl Drop for ScopedBrowserSession {
    fn drop(&mut self) {
        self.close();
    }
}
