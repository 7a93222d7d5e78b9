#![allow(dead_code)]

pub mod fake_resolver;
pub mod range_server;

use ytfs_core::http::HttpOptions;
use ytfs_core::retry::RetryPolicy;

/// Small read-ahead so reads span several range requests; no retries.
pub fn test_http_options() -> HttpOptions {
    HttpOptions {
        read_ahead: 64,
        retry: RetryPolicy::none(),
        ..HttpOptions::default()
    }
}

/// `0, 1, ..., 255, 0, 1, ...` of length `len`.
pub fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 256) as u8).collect()
}
