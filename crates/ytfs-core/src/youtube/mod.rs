//! YouTube playlists and videos as a read-only filesystem.
//!
//! The filesystem is flat: the root directory holds one file per video
//! (`"<title>.<ext>"`). Names are mapped back to video ids through a cache
//! that listing the root fills; a file is only known after a listing.

mod media;
mod name;

pub use name::entry_name;

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, RwLock};

use serde_json::{json, Map, Value};

use crate::config::YtfsConfig;
use crate::error::FsError;
use crate::filesystem::{Filesystem, FsMeta};
use crate::http::{probe, HttpOptions, HttpStream, RemoteFile, SeekableHttpFile};
use crate::info::{Info, Namespaces, ResourceType, DETAILS, MEDIA};
use crate::mode::OpenMode;
use crate::path;
use crate::resolver::{ResolveError, Video, VideoResolver};
use crate::retry::run_with_retry;

const META: FsMeta = FsMeta {
    case_insensitive: false,
    invalid_path_chars: "\0\"\\[]+|<>=;?*:",
    network: true,
    read_only: true,
    thread_safe: true,
    unicode_paths: true,
    virtual_fs: false,
};

#[derive(Debug, Clone)]
pub struct FsOptions {
    /// Treat the id as a playlist (true) or a single video (false).
    pub playlist: bool,
    /// Open files with range-request seeking instead of a forward-only stream.
    pub seekable: bool,
    pub http: HttpOptions,
}

impl Default for FsOptions {
    fn default() -> Self {
        Self {
            playlist: true,
            seekable: true,
            http: HttpOptions::default(),
        }
    }
}

impl FsOptions {
    pub fn from_config(cfg: &YtfsConfig) -> Self {
        Self {
            playlist: true,
            seekable: cfg.seekable,
            http: cfg.http_options(),
        }
    }

    pub fn video(mut self) -> Self {
        self.playlist = false;
        self
    }

    pub fn playlist(mut self) -> Self {
        self.playlist = true;
        self
    }
}

pub struct YoutubeFs {
    resolver: Arc<dyn VideoResolver>,
    /// Playlist or video id (or link) as given.
    id: String,
    opts: FsOptions,
    title: String,
    /// Normalized path -> video id.
    cache: RwLock<HashMap<String, String>>,
}

impl YoutubeFs {
    /// Resolves the playlist (or video) title. Fails with `InvalidId` for a
    /// malformed id and `RemoteConnection` when the resource is unavailable.
    pub fn new(
        resolver: Arc<dyn VideoResolver>,
        id: &str,
        opts: FsOptions,
    ) -> Result<Self, FsError> {
        let title = if opts.playlist {
            resolver.playlist(id)?.title
        } else {
            resolver.video(id)?.title
        };
        tracing::debug!(id, playlist = opts.playlist, %title, "opened youtube filesystem");
        Ok(Self {
            resolver,
            id: id.to_string(),
            opts,
            title,
            cache: RwLock::new(HashMap::new()),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_playlist(&self) -> bool {
        self.opts.playlist
    }

    fn validate(&self, p: &str) -> Result<String, FsError> {
        path::validate(p, META.invalid_path_chars)
    }

    fn cached_id(&self, normalized: &str) -> Option<String> {
        self.cache
            .read()
            .ok()
            .and_then(|cache| cache.get(normalized).cloned())
    }

    fn list_root(&self) -> Result<Vec<String>, FsError> {
        let videos: Vec<Video> = if self.opts.playlist {
            self.resolver.playlist(&self.id)?.items
        } else {
            vec![self.resolver.video(&self.id)?]
        };

        let mut names = Vec::with_capacity(videos.len());
        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(videos.len());
        for video in &videos {
            let ext = &video.best.extension;
            let mut name = entry_name(&video.title, &video.id, ext, META.invalid_path_chars);
            let mut attempt = 0;
            while seen.contains(&name) {
                attempt += 1;
                name = name::disambiguated_name(
                    &video.title,
                    &video.id,
                    ext,
                    META.invalid_path_chars,
                    attempt,
                );
            }
            seen.insert(name.clone());
            entries.push((path::join(path::ROOT, &name), video.id.clone()));
            names.push(name);
        }

        let mut cache = self
            .cache
            .write()
            .map_err(|_| FsError::Io(std::io::Error::other("path cache poisoned")))?;
        cache.extend(entries);
        Ok(names)
    }

    fn resolve_video(&self, video_id: &str) -> Result<Video, FsError> {
        Ok(self.resolver.video(video_id)?)
    }

    /// Stream size from the resolver, else from a HEAD probe.
    fn stream_size(&self, video: &Video) -> Option<u64> {
        if let Some(size) = video.best.filesize {
            return Some(size);
        }
        let stream = &video.best;
        match run_with_retry(&self.opts.http.retry, || {
            probe(&stream.url, &stream.http_headers, &self.opts.http)
        }) {
            Ok(result) => result.content_length,
            Err(e) => {
                tracing::warn!(video = %video.id, "size probe failed: {e}");
                None
            }
        }
    }
}

impl Filesystem for YoutubeFs {
    fn meta(&self) -> &FsMeta {
        &META
    }

    fn listdir(&self, p: &str) -> Result<Vec<String>, FsError> {
        let normalized = self.validate(p)?;
        if path::is_root(&normalized) {
            return self.list_root();
        }
        if self.cached_id(&normalized).is_some() {
            return Err(FsError::DirectoryExpected {
                path: p.to_string(),
            });
        }
        Err(FsError::not_found(p))
    }

    fn getinfo(&self, p: &str, namespaces: &Namespaces) -> Result<Info, FsError> {
        let normalized = self.validate(p)?;
        if path::is_root(&normalized) {
            let mut info = Info::new("", true);
            let mut details = Map::new();
            details.insert("type".into(), json!(u8::from(ResourceType::Directory)));
            info.set_namespace(DETAILS, details);
            return Ok(info);
        }

        let video_id = self
            .cached_id(&normalized)
            .ok_or_else(|| FsError::not_found(p))?;
        let mut info = Info::new(path::basename(&normalized), false);

        if !namespaces.contains(DETAILS) && !namespaces.contains(MEDIA) {
            return Ok(info);
        }
        let video = self.resolve_video(&video_id)?;
        if namespaces.contains(DETAILS) {
            let mut details = Map::new();
            details.insert("type".into(), json!(u8::from(ResourceType::File)));
            details.insert(
                "size".into(),
                self.stream_size(&video).map(Value::from).unwrap_or(Value::Null),
            );
            info.set_namespace(DETAILS, details);
        }
        if namespaces.contains(MEDIA) {
            info.set_namespace(MEDIA, media::media_namespace(&video));
        }
        Ok(info)
    }

    fn openbin(&self, p: &str, mode: &str) -> Result<RemoteFile, FsError> {
        let mode = OpenMode::parse_binary(mode)?;
        if mode.writing() || !mode.reading() {
            return Err(FsError::unsupported(format!(
                "open mode {mode} on read-only filesystem"
            )));
        }
        let normalized = self.validate(p)?;
        if path::is_root(&normalized) {
            return Err(FsError::FileExpected {
                path: p.to_string(),
            });
        }
        let video_id = self
            .cached_id(&normalized)
            .ok_or_else(|| FsError::not_found(p))?;
        let video = match self.resolver.video(&video_id) {
            Ok(v) => v,
            Err(ResolveError::Unavailable(msg)) => {
                tracing::warn!(video = %video_id, "video vanished: {msg}");
                return Err(FsError::not_found(p));
            }
            Err(e) => return Err(e.into()),
        };

        let stream = video.best;
        tracing::debug!(path = %normalized, seekable = self.opts.seekable, "opening stream");
        if self.opts.seekable {
            let file =
                SeekableHttpFile::open(&stream.url, stream.http_headers, self.opts.http.clone())?;
            Ok(RemoteFile::seekable(&normalized, mode, file))
        } else {
            let s = HttpStream::open(&stream.url, stream.http_headers, self.opts.http.clone())?;
            Ok(RemoteFile::stream(&normalized, mode, s))
        }
    }

    fn close(&self) {
        if let Ok(mut cache) = self.cache.write() {
            cache.clear();
        }
    }
}

impl fmt::Display for YoutubeFs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "YoutubeFS: {}", self.title)
    }
}

impl fmt::Debug for YoutubeFs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YoutubeFs")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("playlist", &self.opts.playlist)
            .field("seekable", &self.opts.seekable)
            .finish()
    }
}
