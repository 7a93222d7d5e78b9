//! Seekable reader over HTTP range requests.
//!
//! The remote resource has no native seek; every read that misses the local
//! buffer issues `Range: bytes=pos-end` against the media URL. Seeking only
//! moves the cursor.

use std::collections::HashMap;
use std::fmt;
use std::io::{self, Read, Seek, SeekFrom};

use super::{new_easy, probe, HttpOptions, ProbeResult};
use crate::error::FsError;
use crate::retry::{run_with_retry, FetchError};

pub struct SeekableHttpFile {
    url: String,
    headers: HashMap<String, String>,
    opts: HttpOptions,
    pos: u64,
    /// Total size when the server reported it.
    len: Option<u64>,
    /// Read-ahead buffer holding bytes `[buf_start, buf_start + buf.len())`.
    buf: Vec<u8>,
    buf_start: u64,
}

impl SeekableHttpFile {
    /// Probes `url` and returns a reader positioned at offset 0.
    pub fn open(
        url: &str,
        headers: HashMap<String, String>,
        opts: HttpOptions,
    ) -> Result<Self, FsError> {
        let info: ProbeResult = run_with_retry(&opts.retry, || probe(url, &headers, &opts))
            .map_err(|e| FsError::RemoteConnection {
                msg: format!("{url}: {e}"),
            })?;
        if !info.accept_ranges {
            tracing::debug!("{url} does not advertise byte ranges; reads may fetch the full body");
        }
        Ok(Self {
            url: url.to_string(),
            headers,
            opts,
            pos: 0,
            len: info.content_length,
            buf: Vec::new(),
            buf_start: 0,
        })
    }

    pub fn tell(&self) -> u64 {
        self.pos
    }

    pub fn len(&self) -> Option<u64> {
        self.len
    }

    fn buffered(&self) -> &[u8] {
        let end = self.buf_start + self.buf.len() as u64;
        if self.pos >= self.buf_start && self.pos < end {
            &self.buf[(self.pos - self.buf_start) as usize..]
        } else {
            &[]
        }
    }

    fn at_eof(&self) -> bool {
        matches!(self.len, Some(len) if self.pos >= len)
    }

    /// Fetches at least `want` bytes starting at the cursor into the buffer.
    fn fill(&mut self, want: usize) -> io::Result<()> {
        let size = want.max(self.opts.read_ahead).max(1) as u64;
        let mut end = self.pos.saturating_add(size - 1);
        if let Some(len) = self.len {
            end = end.min(len.saturating_sub(1));
        }
        let data = self.fetch(self.pos, Some(end))?;
        self.buf = data;
        self.buf_start = self.pos;
        Ok(())
    }

    /// Bytes a complete answer for `start..=end_incl` must carry, when the size is known.
    fn expected_len(&self, start: u64, end_incl: Option<u64>) -> Option<u64> {
        let len = self.len?;
        if start >= len {
            return None;
        }
        let last = end_incl.unwrap_or(len - 1).min(len - 1);
        Some(last.checked_sub(start)? + 1)
    }

    fn fetch(&self, start: u64, end_incl: Option<u64>) -> io::Result<Vec<u8>> {
        let expected = self.expected_len(start, end_incl);
        run_with_retry(&self.opts.retry, || {
            let data = fetch_range(&self.url, &self.headers, &self.opts, start, end_incl)?;
            match expected {
                Some(expected) if (data.len() as u64) < expected => {
                    Err(FetchError::PartialTransfer {
                        expected,
                        received: data.len() as u64,
                    })
                }
                _ => Ok(data),
            }
        })
        .map_err(|e| {
            io::Error::from(FsError::RemoteConnection {
                msg: format!("range {start}-: {e}"),
            })
        })
    }
}

/// One GET for bytes `start..=end_incl` (or `start..` when open-ended).
/// A 416 answer means the range starts at or past the end and yields no bytes.
/// Servers that ignore `Range` answer 200 with the whole body, which is sliced here.
fn fetch_range(
    url: &str,
    headers: &HashMap<String, String>,
    opts: &HttpOptions,
    start: u64,
    end_incl: Option<u64>,
) -> Result<Vec<u8>, FetchError> {
    // curl expects "start-end" (inclusive), not "bytes=start-end".
    let range = match end_incl {
        Some(end) => format!("{start}-{end}"),
        None => format!("{start}-"),
    };
    tracing::debug!(%range, "range GET {url}");

    let mut easy = new_easy(url, headers, opts)?;
    easy.range(&range)?;

    let mut body: Vec<u8> = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    match easy.response_code()? {
        206 => {
            if let Some(end) = end_incl {
                let expected = end - start + 1;
                if (body.len() as u64) > expected {
                    body.truncate(expected as usize);
                }
            }
            Ok(body)
        }
        416 => Ok(Vec::new()),
        200 => {
            tracing::warn!("{url} ignored Range header; slicing full body");
            let from = (start as usize).min(body.len());
            let mut slice = body.split_off(from);
            if let Some(end) = end_incl {
                slice.truncate((end - start + 1) as usize);
            }
            Ok(slice)
        }
        code => Err(FetchError::Http(code)),
    }
}

impl Read for SeekableHttpFile {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        if out.is_empty() || self.at_eof() {
            return Ok(0);
        }
        if self.buffered().is_empty() {
            self.fill(out.len())?;
        }
        let avail = self.buffered();
        let n = avail.len().min(out.len());
        out[..n].copy_from_slice(&avail[..n]);
        self.pos += n as u64;
        Ok(n)
    }

    /// Drains the buffer, then fetches the rest with one open-ended range.
    fn read_to_end(&mut self, out: &mut Vec<u8>) -> io::Result<usize> {
        let mut total = 0;
        let buffered = self.buffered().len();
        if buffered > 0 {
            out.extend_from_slice(self.buffered());
            self.pos += buffered as u64;
            total += buffered;
        }
        if self.at_eof() {
            return Ok(total);
        }
        let rest = self.fetch(self.pos, None)?;
        self.pos += rest.len() as u64;
        total += rest.len();
        out.extend_from_slice(&rest);
        Ok(total)
    }
}

impl Seek for SeekableHttpFile {
    fn seek(&mut self, from: SeekFrom) -> io::Result<u64> {
        let target = match from {
            SeekFrom::Start(n) => n,
            SeekFrom::Current(delta) => self.pos.checked_add_signed(delta).ok_or_else(|| {
                io::Error::new(io::ErrorKind::InvalidInput, "seek before start of file")
            })?,
            SeekFrom::End(_) => {
                return Err(FsError::unsupported("seek from end of file").into());
            }
        };
        self.pos = target;
        Ok(target)
    }

    fn stream_position(&mut self) -> io::Result<u64> {
        Ok(self.pos)
    }
}

impl fmt::Debug for SeekableHttpFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeekableHttpFile")
            .field("url", &self.url)
            .field("pos", &self.pos)
            .field("len", &self.len)
            .finish()
    }
}
