//! In-memory `VideoResolver` whose streams point at the test range server.

use std::collections::{HashMap, HashSet};

use ytfs_core::resolver::{Playlist, ResolveError, Stream, Video, VideoResolver};

#[derive(Default)]
pub struct FakeResolver {
    videos: HashMap<String, Video>,
    playlists: HashMap<String, Playlist>,
    /// Ids listed in playlists that fail to resolve on their own.
    unavailable: HashSet<String>,
}

impl FakeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_video(mut self, video: Video) -> Self {
        self.videos.insert(video.id.clone(), video);
        self
    }

    pub fn with_playlist(mut self, id: &str, title: &str, video_ids: &[&str]) -> Self {
        let items = video_ids
            .iter()
            .filter_map(|v| self.videos.get(*v).cloned())
            .collect();
        self.playlists.insert(
            id.to_string(),
            Playlist {
                id: id.to_string(),
                title: title.to_string(),
                items,
            },
        );
        self
    }

    /// Keeps the video in playlists but makes direct lookups fail.
    pub fn make_unavailable(mut self, video_id: &str) -> Self {
        self.unavailable.insert(video_id.to_string());
        self
    }
}

impl VideoResolver for FakeResolver {
    fn video(&self, id: &str) -> Result<Video, ResolveError> {
        if id.len() != 11 {
            return Err(ResolveError::InvalidId(id.to_string()));
        }
        if self.unavailable.contains(id) {
            return Err(ResolveError::Unavailable(format!("{id}: Video unavailable")));
        }
        self.videos
            .get(id)
            .cloned()
            .ok_or_else(|| ResolveError::Unavailable(format!("{id}: Video unavailable")))
    }

    fn playlist(&self, id: &str) -> Result<Playlist, ResolveError> {
        if !id.starts_with("PL") || id.len() < 13 {
            return Err(ResolveError::InvalidId(id.to_string()));
        }
        self.playlists
            .get(id)
            .cloned()
            .ok_or_else(|| ResolveError::Unavailable(format!("{id}: This playlist does not exist")))
    }
}

/// A video whose best stream is `url`.
pub fn video(id: &str, title: &str, url: &str, filesize: Option<u64>) -> Video {
    Video {
        id: id.to_string(),
        title: title.to_string(),
        author: "Uploader".to_string(),
        length: Some(61),
        duration: "00:01:01".to_string(),
        keywords: vec!["test".to_string()],
        best: Stream {
            url: url.to_string(),
            extension: "mp4".to_string(),
            media_type: "normal".to_string(),
            quality: "640x360".to_string(),
            filesize,
            http_headers: HashMap::new(),
        },
        ..Default::default()
    }
}
