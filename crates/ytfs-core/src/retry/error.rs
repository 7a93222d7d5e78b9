//! Fetch error type for retry classification.

use thiserror::Error;

/// Error returned by a single HTTP exchange (curl failure or HTTP status).
/// Kept separate from `FsError` so the retry loop can classify it first.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Curl reported an error (timeout, connection, etc.).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// HTTP response had an unexpected status.
    #[error("HTTP {0}")]
    Http(u32),
    /// The transfer ended before the advertised body was received.
    #[error("partial transfer: expected {expected} bytes, got {received}")]
    PartialTransfer { expected: u64, received: u64 },
}
