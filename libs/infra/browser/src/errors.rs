// [libs/infra/browser/src/errors.rs]
/*!
 * =================================================================
 * APARATO: EXTRACTOR ERROR CATALOG (V1.0)
 * CLASIFICACIÓN: INFRASTRUCTURE CORE (ESTRATO L3)
 * =================================================================
 */

use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractorError {
    #[error("[L3_BROWSER_FAULT]: RATE_LIMITED -> retry after {suggested_wait:?}")]
    TooManyRequests { suggested_wait: Duration },

    #[error("[L3_BROWSER_FAULT]: BATCH_CRAWLER_END -> pause for {suggested_wait:?}")]
    EndBatchCrawler { suggested_wait: Duration },

    #[error("[L3_BROWSER_FAULT]: SESSION_TIMEOUT")]
    BrowserTimeout,

    #[error("[L3_BROWSER_FAULT]: DRIVER_FAULT -> {0}")]
    DriverFault(String),

    #[error("[L3_BROWSER_FAULT]: NO_CONTENT_FOUND")]
    NoContentFound,

    #[error("[L3_BROWSER_FAULT]: INVALID_ARCHIVE_ID")]
    InvalidId,

    #[error("[L3_BROWSER_FAULT]: AGE_RESTRICTED")]
    AgeRestricted,

    #[error("[L3_BROWSER_FAULT]: NO_CREATIVES_FOUND")]
    NoCreatives,

    #[error("[L3_BROWSER_FAULT]: IP_VIOLATION")]
    IpViolation,

    #[error("[L3_BROWSER_FAULT]: PERMANENTLY_UNAVAILABLE")]
    PermanentlyUnavailable,

    #[error("[L3_BROWSER_NET_FAULT]: {0}")]
    Network(#[from] reqwest::Error),
}
