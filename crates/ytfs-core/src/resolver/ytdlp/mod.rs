//! `VideoResolver` backed by the yt-dlp command-line program.
//!
//! Each lookup runs `yt-dlp -J` once and decodes the single JSON document it
//! prints. Playlists are resolved fully so every entry carries its stream.

mod parse;

use std::path::PathBuf;
use std::process::Command;

use super::ids::{extract_playlist_id, extract_video_id};
use super::{Playlist, ResolveError, Video, VideoResolver};
use crate::config::YtfsConfig;
use parse::InfoDict;

/// stderr fragments that mean "well-formed id, but nothing there".
const UNAVAILABLE_MARKERS: &[&str] = &[
    "Video unavailable",
    "Private video",
    "has been removed",
    "does not exist",
    "HTTP Error 404",
    "This playlist",
    "not available",
];

#[derive(Debug, Clone)]
pub struct YtDlpResolver {
    program: PathBuf,
    format: String,
}

impl YtDlpResolver {
    pub fn new(program: impl Into<PathBuf>, format: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            format: format.into(),
        }
    }

    pub fn from_config(cfg: &YtfsConfig) -> Self {
        Self::new(&cfg.ytdlp_path, &cfg.format)
    }

    fn dump_json(&self, url: &str, playlist: bool) -> Result<InfoDict, ResolveError> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("--dump-single-json")
            .arg("--no-warnings")
            .arg("--format")
            .arg(&self.format);
        if playlist {
            cmd.arg("--yes-playlist").arg("--ignore-errors");
        } else {
            cmd.arg("--no-playlist");
        }
        cmd.arg("--").arg(url);

        tracing::debug!("resolving {url} with {}", self.program.display());
        let output = cmd.output().map_err(|e| {
            ResolveError::Command(format!("could not run {}: {e}", self.program.display()))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = stderr
                .lines()
                .rev()
                .find(|l| !l.trim().is_empty())
                .unwrap_or("no error output")
                .trim()
                .to_string();
            if UNAVAILABLE_MARKERS.iter().any(|m| stderr.contains(m)) {
                return Err(ResolveError::Unavailable(message));
            }
            return Err(ResolveError::Command(format!(
                "{} exited with {}: {message}",
                self.program.display(),
                output.status
            )));
        }

        Ok(serde_json::from_slice(&output.stdout)?)
    }
}

impl VideoResolver for YtDlpResolver {
    fn video(&self, id: &str) -> Result<Video, ResolveError> {
        let id = extract_video_id(id)?;
        let url = format!("https://www.youtube.com/watch?v={id}");
        let info = self.dump_json(&url, false)?;
        info.into_video()
            .ok_or_else(|| ResolveError::Unavailable(format!("{id}: no playable stream")))
    }

    fn playlist(&self, id: &str) -> Result<Playlist, ResolveError> {
        let id = extract_playlist_id(id)?;
        let url = format!("https://www.youtube.com/playlist?list={id}");
        let info = self.dump_json(&url, true)?;
        if !info.is_playlist() {
            return Err(ResolveError::Unavailable(format!("{id}: not a playlist")));
        }
        Ok(info.into_playlist())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    /// Writes an executable shell script standing in for yt-dlp.
    fn fake_program(dir: &std::path::Path, body: &str) -> PathBuf {
        let path = dir.join("yt-dlp");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn resolves_video_from_program_output() {
        let dir = tempfile::tempdir().unwrap();
        let program = fake_program(
            dir.path(),
            r#"echo '{"id":"cpPG0bKHYKc","title":"T","url":"http://m/v.webm","ext":"webm"}'"#,
        );
        let r = YtDlpResolver::new(program, "best");
        let v = r.video("https://youtu.be/cpPG0bKHYKc").unwrap();
        assert_eq!(v.title, "T");
        assert_eq!(v.best.extension, "webm");
    }

    #[test]
    fn unavailable_video() {
        let dir = tempfile::tempdir().unwrap();
        let program = fake_program(
            dir.path(),
            "echo 'ERROR: [youtube] cpPG1bKHYKc: Video unavailable' >&2; exit 1",
        );
        let r = YtDlpResolver::new(program, "best");
        assert!(matches!(
            r.video("cpPG1bKHYKc"),
            Err(ResolveError::Unavailable(_))
        ));
    }

    #[test]
    fn invalid_ids_never_reach_the_program() {
        let r = YtDlpResolver::new("/nonexistent/yt-dlp", "best");
        assert!(matches!(r.video("12345"), Err(ResolveError::InvalidId(_))));
        assert!(matches!(r.playlist("12345"), Err(ResolveError::InvalidId(_))));
    }

    #[test]
    fn missing_program_is_command_error() {
        let r = YtDlpResolver::new("/nonexistent/yt-dlp", "best");
        assert!(matches!(r.video("cpPG0bKHYKc"), Err(ResolveError::Command(_))));
    }

    #[test]
    fn playlist_document_required() {
        let dir = tempfile::tempdir().unwrap();
        let program = fake_program(dir.path(), r#"echo '{"id":"x","title":"solo"}'"#);
        let r = YtDlpResolver::new(program, "best");
        assert!(matches!(
            r.playlist("PLYlZ5VtcfgitfPyMGkZsYkhLm-eOZeQpY"),
            Err(ResolveError::Unavailable(_))
        ));
    }
}
