//! Error types shared across the DreamGarden crates.
//!
//! Fetch failures are always recovered by the caller (fallback data), so
//! these types exist mostly to make the recovery path loggable.

use thiserror::Error;

/// Failure to obtain catalog or weather data from an upstream source.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The source has no credentials configured.
    #[error("upstream not configured: {0}")]
    NotConfigured(&'static str),

    /// The bounded wait elapsed before a response arrived.
    #[error("upstream timed out")]
    Timeout,

    /// The upstream answered with a non-success status.
    #[error("upstream responded with status {0}")]
    Status(u16),

    /// Transport-level failure (DNS, TLS, connection reset).
    #[error("network error: {0}")]
    Network(String),

    /// The response body did not have the expected shape.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

/// Failure of the key-value backend behind the layout store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    /// Backend-specific failure (e.g. browser storage quota).
    #[error("storage backend error: {0}")]
    Backend(String),
}
