//! Video and playlist id extraction from bare ids or YouTube links.

use super::ResolveError;

const VIDEO_ID_LEN: usize = 11;
const MIN_PLAYLIST_ID_LEN: usize = 13;
const PLAYLIST_PREFIXES: &[&str] = &["OLAK5uy_", "PL", "UU", "LL", "FL", "RD", "OL", "UL", "PU"];

fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn is_video_id(s: &str) -> bool {
    s.len() == VIDEO_ID_LEN && s.chars().all(is_id_char)
}

fn is_playlist_id(s: &str) -> bool {
    s.len() >= MIN_PLAYLIST_ID_LEN
        && s.chars().all(is_id_char)
        && PLAYLIST_PREFIXES.iter().any(|p| s.starts_with(p))
}

fn parse_link(input: &str) -> Option<url::Url> {
    let parsed = url::Url::parse(input).ok()?;
    matches!(parsed.scheme(), "http" | "https").then_some(parsed)
}

fn query_param(link: &url::Url, key: &str) -> Option<String> {
    link.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// Returns the 11-character video id of a bare id or a YouTube video link
/// (`watch?v=`, `youtu.be/`, `/embed/`, `/shorts/`, `/v/`).
pub fn extract_video_id(input: &str) -> Result<String, ResolveError> {
    let input = input.trim();
    if is_video_id(input) {
        return Ok(input.to_string());
    }
    let invalid = || ResolveError::InvalidId(input.to_string());
    let link = parse_link(input).ok_or_else(invalid)?;

    let candidate = query_param(&link, "v").or_else(|| {
        let mut segments = link.path_segments()?.filter(|s| !s.is_empty());
        let host = link.host_str().unwrap_or("");
        if host.ends_with("youtu.be") {
            return segments.next().map(str::to_string);
        }
        match segments.next()? {
            "embed" | "shorts" | "v" | "live" => segments.next().map(str::to_string),
            _ => None,
        }
    });
    candidate.filter(|c| is_video_id(c)).ok_or_else(invalid)
}

/// Returns the playlist id of a bare id or a link carrying `list=`.
pub fn extract_playlist_id(input: &str) -> Result<String, ResolveError> {
    let input = input.trim();
    if is_playlist_id(input) {
        return Ok(input.to_string());
    }
    parse_link(input)
        .and_then(|link| query_param(&link, "list"))
        .filter(|id| is_playlist_id(id))
        .ok_or_else(|| ResolveError::InvalidId(input.to_string()))
}
