//! `mediaproxy.media` info namespace.

use serde_json::{json, Map, Value};

use crate::resolver::Video;

/// Media metadata of a video and its best stream.
pub fn media_namespace(video: &Video) -> Map<String, Value> {
    let stream = &video.best;
    let value = json!({
        "type": "video",
        "title": video.title,
        "rating": video.rating,
        "viewcount": video.view_count,
        "author": video.author,
        "length": video.length,
        "duration": video.duration,
        "likes": video.likes,
        "dislikes": video.dislikes,
        "description": video.description,
        "thumb": video.thumb,
        "bigthumb": video.big_thumb,
        "category": video.category,
        "videoid": video.id,
        "keywords": video.keywords,
        "mediatype": stream.media_type,
        "extension": stream.extension,
        "quality": stream.quality,
        "url": stream.url,
    });
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
