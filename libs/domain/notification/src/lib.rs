// [libs/domain/notification/src/lib.rs]
/*!
 * =================================================================
 * APARATO: HERALD NOTIFICATION ENGINE (V1.1 - SOBERANO)
 * CLASIFICACIÓN: DOMAIN LOGIC (ESTRATO L2)
 * RESPONSABILIDAD: DEFINICIÓN DE SEÑALES DE ALERTA Y PUBLICACIÓN
 *
 * Contrato inmutable para notificar al operador humano desde el núcleo:
 * agotamiento de cuota del extractor, fallos no manejados, etc.
 * =================================================================
 */

mod slack;

pub use slack::SlackNotifier;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Clasificación semántica de la urgencia de la señal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum NotificationSeverity {
    Info,
    Warning,
    Critical,
}

/// Representa una unidad atómica de comunicación dirigida al operador.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemNotification {
    pub identifier: String,
    pub severity_level: NotificationSeverity,
    pub message: String,
    pub creation_timestamp_utc: DateTime<Utc>,
}

impl SystemNotification {
    pub fn new(severity_level: NotificationSeverity, message: impl Into<String>) -> Self {
        Self {
            identifier: uuid::Uuid::new_v4().to_string(),
            severity_level,
            message: message.into(),
            creation_timestamp_utc: Utc::now(),
        }
    }

    /// Published when the extractor reports `TooManyRequests` or
    /// `EndBatchCrawler` and the current batch is about to be released.
    pub fn rate_limited(host: &str, resume_after_secs: u64) -> Self {
        Self::new(
            NotificationSeverity::Warning,
            format!(
                "[{host}] rate limit signal from extractor; releasing batch and sleeping {resume_after_secs}s"
            ),
        )
    }

    /// Published when an unhandled exception escapes the pipeline's top
    /// level: "unknown exception at top -> publish alert (with host FQDN);
    /// re-raise."
    pub fn unhandled_error(host: &str, error: &str) -> Self {
        Self::new(
            NotificationSeverity::Critical,
            format!("[{host}] unhandled error: {error}"),
        )
    }
}

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("notification transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// One-line publish to an operator chat channel.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: &SystemNotification) -> Result<(), NotificationError>;
}

/// Discards every notification. Used when no operator-chat webhook is
/// configured, so the pipeline's alerting calls stay unconditional.
pub struct NullNotifier;

#[async_trait]
impl Notifier for NullNotifier {
    async fn notify(&self, _notification: &SystemNotification) -> Result<(), NotificationError> {
        Ok(())
    }
}
