//! Retry and backoff policy for HTTP fetches.
//!
//! Range reads and probes classify their failures (timeouts, throttling,
//! connection drops) and back off exponentially before trying again.

mod classify;
mod error;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use error::FetchError;
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retry;
