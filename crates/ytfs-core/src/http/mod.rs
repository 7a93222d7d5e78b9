//! Remote byte streams over HTTP.
//!
//! Media URLs handed out by the resolver are plain HTTP resources. They are
//! exposed either as a seekable reader built on `Range` requests or as a
//! forward-only streaming GET. Both use libcurl through the curl crate and
//! block the calling thread.

mod file;
mod probe;
mod range;
mod stream;

pub use file::RemoteFile;
pub use probe::{probe, ProbeResult};
pub use range::SeekableHttpFile;
pub use stream::HttpStream;

use std::collections::HashMap;
use std::time::Duration;

use crate::retry::RetryPolicy;

/// Transfer settings shared by probes, range reads and streams.
#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub connect_timeout: Duration,
    /// Abort when throughput stays below this many bytes/s for `low_speed_time`.
    pub low_speed_limit: u32,
    pub low_speed_time: Duration,
    /// Minimum size of a range request issued by `SeekableHttpFile`.
    pub read_ahead: usize,
    pub user_agent: Option<String>,
    pub retry: RetryPolicy,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            low_speed_limit: 1024,
            low_speed_time: Duration::from_secs(60),
            read_ahead: 256 * 1024,
            user_agent: None,
            retry: RetryPolicy::default(),
        }
    }
}

/// Creates an Easy handle with URL, redirects, timeouts and custom headers applied.
fn new_easy(
    url: &str,
    headers: &HashMap<String, String>,
    opts: &HttpOptions,
) -> Result<curl::easy::Easy, curl::Error> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(opts.connect_timeout)?;
    // Low-speed abort instead of a wall-clock timeout: long videos on slow
    // links must not be cut off.
    easy.low_speed_limit(opts.low_speed_limit)?;
    easy.low_speed_time(opts.low_speed_time)?;
    if let Some(ua) = &opts.user_agent {
        easy.useragent(ua)?;
    }

    let mut list = curl::easy::List::new();
    for (k, v) in headers {
        list.append(&format!("{}: {}", k.trim(), v.trim()))?;
    }
    if !headers.is_empty() {
        easy.http_headers(list)?;
    }
    Ok(easy)
}

/// Status code of an HTTP status line (`HTTP/1.1 206 Partial Content`).
fn parse_status_line(line: &str) -> Option<u32> {
    let rest = line.strip_prefix("HTTP/")?;
    rest.split_whitespace().nth(1)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_lines() {
        assert_eq!(parse_status_line("HTTP/1.1 206 Partial Content"), Some(206));
        assert_eq!(parse_status_line("HTTP/2 200"), Some(200));
        assert_eq!(parse_status_line("Content-Length: 5"), None);
        assert_eq!(parse_status_line("HTTP/1.1"), None);
    }
}
