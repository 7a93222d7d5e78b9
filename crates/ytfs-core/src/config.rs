use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::http::HttpOptions;
use crate::retry::RetryPolicy;

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per HTTP request (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.25 = 250ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_delay_secs: 0.25,
            max_delay_secs: 10,
        }
    }
}

/// Global configuration loaded from `~/.config/ytfs/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YtfsConfig {
    /// Path or name of the yt-dlp executable.
    pub ytdlp_path: String,
    /// yt-dlp format selector for the stream exposed as file content.
    pub format: String,
    /// Open files with range-request seeking (false = forward-only stream).
    pub seekable: bool,
    /// Minimum bytes fetched per range request; small reads are served from this buffer.
    pub read_ahead_bytes: usize,
    pub connect_timeout_secs: u64,
    /// Abort a transfer when throughput stays below this many bytes/s ...
    pub low_speed_limit: u32,
    /// ... for this many seconds.
    pub low_speed_time_secs: u64,
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

impl Default for YtfsConfig {
    fn default() -> Self {
        Self {
            ytdlp_path: "yt-dlp".to_string(),
            format: "best".to_string(),
            seekable: true,
            read_ahead_bytes: 256 * 1024,
            connect_timeout_secs: 15,
            low_speed_limit: 1024,
            low_speed_time_secs: 60,
            user_agent: None,
            retry: None,
        }
    }
}

impl YtfsConfig {
    /// HTTP settings for opened files.
    pub fn http_options(&self) -> HttpOptions {
        HttpOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            low_speed_limit: self.low_speed_limit,
            low_speed_time: Duration::from_secs(self.low_speed_time_secs),
            read_ahead: self.read_ahead_bytes,
            user_agent: self.user_agent.clone(),
            retry: self
                .retry
                .as_ref()
                .map(RetryPolicy::from)
                .unwrap_or_default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("ytfs")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<YtfsConfig> {
    load_or_init_at(&config_path()?)
}

pub fn load_or_init_at(path: &Path) -> Result<YtfsConfig> {
    if !path.exists() {
        let default_cfg = YtfsConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: YtfsConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = YtfsConfig::default();
        assert_eq!(cfg.ytdlp_path, "yt-dlp");
        assert_eq!(cfg.format, "best");
        assert!(cfg.seekable);
        assert_eq!(cfg.read_ahead_bytes, 256 * 1024);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            ytdlp_path = "/opt/bin/yt-dlp"
            format = "18"
            seekable = false
            read_ahead_bytes = 4096
            connect_timeout_secs = 5
            low_speed_limit = 10
            low_speed_time_secs = 30
            user_agent = "ytfs-test"

            [retry]
            max_attempts = 2
            base_delay_secs = 0.5
            max_delay_secs = 15
        "#;
        let cfg: YtfsConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.ytdlp_path, "/opt/bin/yt-dlp");
        assert!(!cfg.seekable);
        let http = cfg.http_options();
        assert_eq!(http.read_ahead, 4096);
        assert_eq!(http.connect_timeout, Duration::from_secs(5));
        assert_eq!(http.user_agent.as_deref(), Some("ytfs-test"));
        assert_eq!(http.retry.max_attempts, 2);
    }

    #[test]
    fn load_or_init_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = load_or_init_at(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.format, "best");

        let custom = YtfsConfig {
            format: "worst".into(),
            ..YtfsConfig::default()
        };
        fs::write(&path, toml::to_string_pretty(&custom).unwrap()).unwrap();
        let reloaded = load_or_init_at(&path).unwrap();
        assert_eq!(reloaded.format, "worst");
        assert!(reloaded.retry.is_none());
    }
}
