//! Subset of the yt-dlp `--dump-single-json` document used for resolution.

use serde::Deserialize;
use std::collections::HashMap;

use crate::resolver::{format_duration, Playlist, Stream, Video};

#[derive(Debug, Deserialize)]
pub struct InfoDict {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub uploader: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub view_count: Option<u64>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub like_count: Option<u64>,
    #[serde(default)]
    pub dislike_count: Option<u64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub thumbnails: Vec<Thumbnail>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,

    // Selected format (present when a single format was chosen with -f).
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub ext: Option<String>,
    #[serde(default)]
    pub vcodec: Option<String>,
    #[serde(default)]
    pub acodec: Option<String>,
    #[serde(default)]
    pub resolution: Option<String>,
    #[serde(default)]
    pub format_note: Option<String>,
    #[serde(default)]
    pub abr: Option<f64>,
    #[serde(default)]
    pub filesize: Option<u64>,
    #[serde(default)]
    pub filesize_approx: Option<u64>,
    #[serde(default)]
    pub http_headers: HashMap<String, String>,

    // Playlist documents.
    #[serde(default, rename = "_type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub entries: Vec<Option<InfoDict>>,
}

#[derive(Debug, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    #[serde(default)]
    pub width: Option<u64>,
    #[serde(default)]
    pub preference: Option<i64>,
}

fn media_type(vcodec: Option<&str>, acodec: Option<&str>) -> &'static str {
    match (vcodec, acodec) {
        (Some("none"), _) => "audio",
        (_, Some("none")) => "video",
        _ => "normal",
    }
}

impl InfoDict {
    pub fn is_playlist(&self) -> bool {
        self.kind.as_deref() == Some("playlist")
    }

    /// Smallest and largest thumbnails, falling back to `thumbnail`.
    fn thumbs(&self) -> (String, String) {
        let fallback = self.thumbnail.clone().unwrap_or_default();
        let key = |t: &&Thumbnail| (t.width.unwrap_or(0), t.preference.unwrap_or(0));
        let small = self.thumbnails.iter().min_by_key(key).map(|t| t.url.clone());
        let big = self.thumbnails.iter().max_by_key(key).map(|t| t.url.clone());
        (
            small.unwrap_or_else(|| fallback.clone()),
            big.unwrap_or(fallback),
        )
    }

    /// Maps a video document. Returns `None` when no playable stream was selected.
    pub fn into_video(self) -> Option<Video> {
        let url = self.url.clone()?;
        let (thumb, big_thumb) = self.thumbs();
        let quality = self
            .resolution
            .clone()
            .filter(|r| r.as_str() != "audio only")
            .or_else(|| self.format_note.clone())
            .or_else(|| self.abr.map(|abr| format!("{}k", abr.round() as u64)))
            .unwrap_or_default();
        let length = self.duration.map(|d| d.round() as u64);
        let best = Stream {
            url,
            extension: self.ext.clone().unwrap_or_else(|| "mp4".to_string()),
            media_type: media_type(self.vcodec.as_deref(), self.acodec.as_deref()).to_string(),
            quality,
            filesize: self.filesize.or(self.filesize_approx),
            http_headers: self.http_headers,
        };
        Some(Video {
            id: self.id,
            title: self.title.unwrap_or_default(),
            author: self.uploader.or(self.channel).unwrap_or_default(),
            rating: self.average_rating,
            view_count: self.view_count,
            length,
            duration: format_duration(length.unwrap_or(0)),
            likes: self.like_count,
            dislikes: self.dislike_count,
            description: self.description.unwrap_or_default(),
            thumb,
            big_thumb,
            category: self.categories.into_iter().next().unwrap_or_default(),
            keywords: self.tags,
            best,
        })
    }

    /// Maps a playlist document, dropping entries that could not be resolved.
    pub fn into_playlist(self) -> Playlist {
        let items = self
            .entries
            .into_iter()
            .flatten()
            .filter_map(|entry| {
                let id = entry.id.clone();
                let video = entry.into_video();
                if video.is_none() {
                    tracing::warn!(video = %id, "playlist entry has no playable stream; skipped");
                }
                video
            })
            .collect();
        Playlist {
            id: self.id,
            title: self.title.unwrap_or_default(),
            items,
        }
    }
}
