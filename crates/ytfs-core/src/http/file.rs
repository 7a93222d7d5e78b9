//! File object returned by `Filesystem::openbin`.

use std::fmt;
use std::io::{self, Read, Seek, SeekFrom};

use super::{HttpStream, SeekableHttpFile};
use crate::error::FsError;
use crate::mode::OpenMode;

enum Inner {
    Seekable(SeekableHttpFile),
    Stream(HttpStream),
    Closed,
}

/// A read-only remote file. Seeking works only when it was opened seekable.
pub struct RemoteFile {
    path: String,
    mode: OpenMode,
    inner: Inner,
}

impl RemoteFile {
    pub fn seekable(path: &str, mode: OpenMode, file: SeekableHttpFile) -> Self {
        Self {
            path: path.to_string(),
            mode,
            inner: Inner::Seekable(file),
        }
    }

    pub fn stream(path: &str, mode: OpenMode, stream: HttpStream) -> Self {
        Self {
            path: path.to_string(),
            mode,
            inner: Inner::Stream(stream),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn mode(&self) -> &OpenMode {
        &self.mode
    }

    pub fn readable(&self) -> bool {
        self.mode.reading()
    }

    pub fn writable(&self) -> bool {
        false
    }

    pub fn is_seekable(&self) -> bool {
        matches!(self.inner, Inner::Seekable(_))
    }

    /// Current offset; `0` once closed.
    pub fn tell(&self) -> u64 {
        match &self.inner {
            Inner::Seekable(f) => f.tell(),
            Inner::Stream(s) => s.tell(),
            Inner::Closed => 0,
        }
    }

    /// Total size when known (seekable files only).
    pub fn len(&self) -> Option<u64> {
        match &self.inner {
            Inner::Seekable(f) => f.len(),
            _ => None,
        }
    }

    pub fn flush(&mut self) {}

    /// Drops the underlying connection. Further reads fail.
    pub fn close(&mut self) {
        if !self.closed() {
            tracing::debug!(path = %self.path, "closing remote file");
        }
        self.inner = Inner::Closed;
    }

    pub fn closed(&self) -> bool {
        matches!(self.inner, Inner::Closed)
    }
}

fn closed_error() -> io::Error {
    io::Error::new(io::ErrorKind::Other, "I/O operation on closed file")
}

impl Read for RemoteFile {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        match &mut self.inner {
            Inner::Seekable(f) => f.read(out),
            Inner::Stream(s) => s.read(out),
            Inner::Closed => Err(closed_error()),
        }
    }

    fn read_to_end(&mut self, out: &mut Vec<u8>) -> io::Result<usize> {
        match &mut self.inner {
            Inner::Seekable(f) => f.read_to_end(out),
            Inner::Stream(s) => s.read_to_end(out),
            Inner::Closed => Err(closed_error()),
        }
    }
}

impl Seek for RemoteFile {
    fn seek(&mut self, from: SeekFrom) -> io::Result<u64> {
        match &mut self.inner {
            Inner::Seekable(f) => f.seek(from),
            Inner::Stream(_) => Err(FsError::unsupported("seek on unseekable stream").into()),
            Inner::Closed => Err(closed_error()),
        }
    }
}

impl fmt::Display for RemoteFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<RemoteFile {:?} mode={:?}>", self.path, self.mode.as_str())
    }
}

impl fmt::Debug for RemoteFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("RemoteFile");
        d.field("path", &self.path).field("mode", &self.mode.as_str());
        match &self.inner {
            Inner::Seekable(s) => d.field("inner", s),
            Inner::Stream(s) => d.field("inner", s),
            Inner::Closed => d.field("inner", &"closed"),
        };
        d.finish()
    }
}
