//! Video metadata resolution.
//!
//! The filesystem only depends on the `VideoResolver` trait and does not know
//! how metadata is fetched. The shipped implementation drives `yt-dlp`.

pub mod ids;
mod ytdlp;

pub use ids::{extract_playlist_id, extract_video_id};
pub use ytdlp::YtDlpResolver;

use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    /// The identifier is malformed for the requested kind.
    #[error("invalid id: {0}")]
    InvalidId(String),
    /// Well-formed id, but the video or playlist is missing, private or removed.
    #[error("unavailable: {0}")]
    Unavailable(String),
    /// The resolver program failed for another reason.
    #[error("resolver failed: {0}")]
    Command(String),
    #[error("could not decode resolver output: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Best available stream of a video.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stream {
    /// Direct media URL.
    pub url: String,
    /// Container extension without dot (e.g. "mp4").
    pub extension: String,
    /// "normal" (audio+video), "video" or "audio".
    pub media_type: String,
    /// Resolution or bitrate label (e.g. "640x360").
    pub quality: String,
    /// Size in bytes when the platform reports it.
    pub filesize: Option<u64>,
    /// Headers the media host expects on requests for `url`.
    pub http_headers: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Video {
    pub id: String,
    pub title: String,
    pub author: String,
    pub rating: Option<f64>,
    pub view_count: Option<u64>,
    /// Length in seconds.
    pub length: Option<u64>,
    /// Length as `HH:MM:SS`.
    pub duration: String,
    pub likes: Option<u64>,
    pub dislikes: Option<u64>,
    pub description: String,
    pub thumb: String,
    pub big_thumb: String,
    pub category: String,
    pub keywords: Vec<String>,
    pub best: Stream,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Playlist {
    pub id: String,
    pub title: String,
    pub items: Vec<Video>,
}

/// Looks up videos and playlists by id.
pub trait VideoResolver: Send + Sync {
    fn video(&self, id: &str) -> Result<Video, ResolveError>;

    fn playlist(&self, id: &str) -> Result<Playlist, ResolveError>;
}

/// Formats seconds as `HH:MM:SS`.
pub fn format_duration(secs: u64) -> String {
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}
