//! Metadata probing for media URLs.
//!
//! A HEAD request confirms the URL is reachable and captures
//! `Content-Length` and `Accept-Ranges`. Some CDNs refuse HEAD; for those a
//! one-byte range GET is issued and the total size taken from `Content-Range`.

use std::collections::HashMap;
use std::str;

use super::{new_easy, parse_status_line, HttpOptions};
use crate::retry::FetchError;

/// Key response headers of a media URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeResult {
    /// Total size in bytes, if known.
    pub content_length: Option<u64>,
    /// True if the server advertised or honoured byte ranges.
    pub accept_ranges: bool,
    pub etag: Option<String>,
    pub last_modified: Option<String>,
}

/// Probes `url` with HEAD, falling back to `Range: bytes=0-0` when HEAD is refused.
pub fn probe(
    url: &str,
    headers: &HashMap<String, String>,
    opts: &HttpOptions,
) -> Result<ProbeResult, FetchError> {
    match head(url, headers, opts) {
        Ok(r) => Ok(r),
        Err(FetchError::Http(code)) if code == 403 || code == 405 || code == 501 => {
            tracing::debug!("HEAD {url} returned {code}; probing with range GET");
            range_probe(url, headers, opts)
        }
        Err(e) => Err(e),
    }
}

fn head(
    url: &str,
    headers: &HashMap<String, String>,
    opts: &HttpOptions,
) -> Result<ProbeResult, FetchError> {
    let mut easy = new_easy(url, headers, opts)?;
    easy.nobody(true)?;
    let lines = perform_collecting_headers(&mut easy, false)?;
    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http(code));
    }
    Ok(parse_headers(&lines))
}

fn range_probe(
    url: &str,
    headers: &HashMap<String, String>,
    opts: &HttpOptions,
) -> Result<ProbeResult, FetchError> {
    let mut easy = new_easy(url, headers, opts)?;
    easy.range("0-0")?;
    let lines = perform_collecting_headers(&mut easy, true)?;
    let code = easy.response_code()?;
    let mut result = parse_headers(&lines);
    match code {
        206 => {
            result.accept_ranges = true;
            result.content_length = lines
                .iter()
                .filter_map(|l| header_value(l, "content-range"))
                .find_map(content_range_total);
        }
        200 => result.accept_ranges = false,
        other => return Err(FetchError::Http(other)),
    }
    Ok(result)
}

/// Performs the transfer and returns the header lines of the final response.
/// Body data is discarded; when `stop_after_body` is set the transfer is cut
/// short after the first chunk.
fn perform_collecting_headers(
    easy: &mut curl::easy::Easy,
    stop_after_body: bool,
) -> Result<Vec<String>, FetchError> {
    let mut lines: Vec<String> = Vec::new();
    let result = {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                let line = s.trim_end();
                // Each redirect hop starts a fresh header block.
                if parse_status_line(line).is_some() {
                    lines.clear();
                }
                lines.push(line.to_string());
            }
            true
        })?;
        transfer.write_function(|data| {
            if stop_after_body {
                Ok(0)
            } else {
                Ok(data.len())
            }
        })?;
        transfer.perform()
    };
    match result {
        Ok(()) => Ok(lines),
        // We aborted on purpose after the first body chunk.
        Err(e) if stop_after_body && e.is_write_error() => Ok(lines),
        Err(e) => Err(FetchError::Curl(e)),
    }
}

fn header_value<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    let (n, v) = line.split_once(':')?;
    n.trim().eq_ignore_ascii_case(name).then(|| v.trim())
}

/// Total size from `Content-Range: bytes 0-0/12345` (`*` means unknown).
fn content_range_total(value: &str) -> Option<u64> {
    value.rsplit_once('/')?.1.trim().parse().ok()
}

/// Parse collected header lines into a ProbeResult.
fn parse_headers(lines: &[String]) -> ProbeResult {
    let mut result = ProbeResult::default();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(value) = header_value(line, "content-length") {
            if let Ok(n) = value.parse::<u64>() {
                result.content_length = Some(n);
            }
        } else if let Some(value) = header_value(line, "accept-ranges") {
            result.accept_ranges = value.eq_ignore_ascii_case("bytes");
        } else if let Some(value) = header_value(line, "etag") {
            result.etag = Some(value.trim_matches('"').to_string());
        } else if let Some(value) = header_value(line, "last-modified") {
            result.last_modified = Some(value.to_string());
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_headers_content_length_and_ranges() {
        let r = parse_headers(&lines(&[
            "HTTP/1.1 200 OK",
            "Content-Length: 12345",
            "Accept-Ranges: bytes",
        ]));
        assert_eq!(r.content_length, Some(12345));
        assert!(r.accept_ranges);
        assert!(r.etag.is_none());
    }

    #[test]
    fn parse_headers_etag_and_last_modified() {
        let r = parse_headers(&lines(&[
            "ETag: \"abc-123\"",
            "Last-Modified: Wed, 21 Oct 2015 07:28:00 GMT",
        ]));
        assert_eq!(r.etag.as_deref(), Some("abc-123"));
        assert_eq!(
            r.last_modified.as_deref(),
            Some("Wed, 21 Oct 2015 07:28:00 GMT")
        );
    }

    #[test]
    fn parse_headers_no_ranges() {
        let r = parse_headers(&lines(&["Content-Length: 999", "Accept-Ranges: none"]));
        assert_eq!(r.content_length, Some(999));
        assert!(!r.accept_ranges);
    }

    #[test]
    fn content_range_totals() {
        assert_eq!(content_range_total("bytes 0-0/4096"), Some(4096));
        assert_eq!(content_range_total("bytes 0-0/*"), None);
        assert_eq!(content_range_total("garbage"), None);
    }
}
