//! Abstract filesystem interface.
//!
//! Backends implement listing, info and binary open. Mutating operations
//! default to `Unsupported` so read-only backends get them for free.

use std::io::Read;

use crate::error::FsError;
use crate::http::RemoteFile;
use crate::info::{Info, Namespaces, DETAILS};

/// Static capabilities of a filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsMeta {
    pub case_insensitive: bool,
    /// Characters that may not appear in a path.
    pub invalid_path_chars: &'static str,
    pub network: bool,
    pub read_only: bool,
    pub thread_safe: bool,
    pub unicode_paths: bool,
    pub virtual_fs: bool,
}

pub trait Filesystem: Send + Sync + std::fmt::Display {
    fn meta(&self) -> &FsMeta;

    /// Names of the entries in the directory at `path`.
    fn listdir(&self, path: &str) -> Result<Vec<String>, FsError>;

    fn getinfo(&self, path: &str, namespaces: &Namespaces) -> Result<Info, FsError>;

    /// Opens a file for binary reading.
    fn openbin(&self, path: &str, mode: &str) -> Result<RemoteFile, FsError>;

    fn makedir(&self, _path: &str) -> Result<(), FsError> {
        Err(FsError::unsupported("makedir"))
    }

    fn remove(&self, _path: &str) -> Result<(), FsError> {
        Err(FsError::unsupported("remove"))
    }

    fn removedir(&self, _path: &str) -> Result<(), FsError> {
        Err(FsError::unsupported("removedir"))
    }

    fn setinfo(&self, _path: &str, _info: &Info) -> Result<(), FsError> {
        Err(FsError::unsupported("setinfo"))
    }

    fn exists(&self, path: &str) -> Result<bool, FsError> {
        match self.getinfo(path, &Namespaces::basic()) {
            Ok(_) => Ok(true),
            Err(FsError::ResourceNotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn isdir(&self, path: &str) -> Result<bool, FsError> {
        match self.getinfo(path, &Namespaces::basic()) {
            Ok(info) => Ok(info.is_dir()),
            Err(FsError::ResourceNotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn isfile(&self, path: &str) -> Result<bool, FsError> {
        match self.getinfo(path, &Namespaces::basic()) {
            Ok(info) => Ok(info.is_file()),
            Err(FsError::ResourceNotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn getdetails(&self, path: &str) -> Result<Info, FsError> {
        self.getinfo(path, &Namespaces::basic().with(DETAILS))
    }

    fn getsize(&self, path: &str) -> Result<Option<u64>, FsError> {
        Ok(self.getdetails(path)?.size())
    }

    /// Reads a whole file into memory.
    fn readbytes(&self, path: &str) -> Result<Vec<u8>, FsError> {
        let mut file = self.openbin(path, "rb")?;
        let mut data = Vec::new();
        file.read_to_end(&mut data).map_err(FsError::from_io)?;
        file.close();
        Ok(data)
    }

    /// Releases any resources. The default does nothing.
    fn close(&self) {}
}
