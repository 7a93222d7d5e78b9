//! Filesystem error taxonomy.
//!
//! Every filesystem operation reports one of these variants so callers can
//! match on "not found" vs. "unsupported" vs. "bad mode" without parsing
//! messages. Streams returned by `openbin` speak `std::io`, so `FsError`
//! converts into `io::Error` and back without losing the variant.

use std::io;

use thiserror::Error;

use crate::resolver::ResolveError;

#[derive(Debug, Error)]
pub enum FsError {
    #[error("resource not found: {path}")]
    ResourceNotFound { path: String },

    #[error("path is not a directory: {path}")]
    DirectoryExpected { path: String },

    #[error("path is not a file: {path}")]
    FileExpected { path: String },

    #[error("operation not supported: {operation}")]
    Unsupported { operation: String },

    #[error("invalid mode {mode:?}: {reason}")]
    InvalidMode { mode: String, reason: String },

    #[error("invalid path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("illegal back reference in path: {path}")]
    IllegalBackReference { path: String },

    #[error("invalid id: {id}")]
    InvalidId { id: String },

    #[error("remote connection failed: {msg}")]
    RemoteConnection { msg: String },

    #[error("unsupported protocol: {scheme}")]
    UnsupportedProtocol { scheme: String },

    #[error("could not parse filesystem url: {url}")]
    OpenerParse { url: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl FsError {
    pub fn not_found(path: impl Into<String>) -> Self {
        FsError::ResourceNotFound { path: path.into() }
    }

    pub fn unsupported(operation: impl Into<String>) -> Self {
        FsError::Unsupported {
            operation: operation.into(),
        }
    }

    /// Recovers an `FsError` that was smuggled through an `io::Error`
    /// (e.g. from `Seek::seek` on a remote file). Plain I/O errors become `Io`.
    pub fn from_io(err: io::Error) -> Self {
        let is_fs_error = err
            .get_ref()
            .map(|inner| inner.is::<FsError>())
            .unwrap_or(false);
        if is_fs_error {
            if let Some(inner) = err.into_inner() {
                if let Ok(fs_err) = inner.downcast::<FsError>() {
                    return *fs_err;
                }
            }
            return FsError::Io(io::Error::new(io::ErrorKind::Other, "unrecoverable error"));
        }
        FsError::Io(err)
    }

    fn io_kind(&self) -> io::ErrorKind {
        match self {
            FsError::ResourceNotFound { .. } => io::ErrorKind::NotFound,
            FsError::Unsupported { .. } => io::ErrorKind::Unsupported,
            FsError::InvalidMode { .. }
            | FsError::InvalidPath { .. }
            | FsError::IllegalBackReference { .. }
            | FsError::InvalidId { .. } => io::ErrorKind::InvalidInput,
            FsError::Io(e) => e.kind(),
            _ => io::ErrorKind::Other,
        }
    }
}

impl From<FsError> for io::Error {
    fn from(err: FsError) -> Self {
        match err {
            FsError::Io(e) => e,
            other => io::Error::new(other.io_kind(), other),
        }
    }
}

impl From<ResolveError> for FsError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::InvalidId(id) => FsError::InvalidId { id },
            other => FsError::RemoteConnection {
                msg: other.to_string(),
            },
        }
    }
}
