//! Filesystem URLs (`youtube://...`) and the openers that handle them.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::config::{self, YtfsConfig};
use crate::error::FsError;
use crate::filesystem::Filesystem;
use crate::resolver::{VideoResolver, YtDlpResolver};
use crate::youtube::{FsOptions, YoutubeFs};

/// A filesystem URL split into scheme, resource and query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFsUrl {
    pub scheme: String,
    /// Everything between `://` and the query string.
    pub resource: String,
    pub params: BTreeMap<String, String>,
}

/// Parses `scheme://resource[?query]`.
///
/// The query may belong to an embedded link, as in
/// `youtube://https://www.youtube.com/watch?v=ID`: its parameters end up in
/// `params` and the resource is the link without the query.
pub fn parse_fs_url(fs_url: &str) -> Result<ParsedFsUrl, FsError> {
    let (scheme, rest) = fs_url.split_once("://").ok_or_else(|| FsError::OpenerParse {
        url: fs_url.to_string(),
    })?;
    let valid_scheme = !scheme.is_empty()
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !valid_scheme || rest.is_empty() {
        return Err(FsError::OpenerParse {
            url: fs_url.to_string(),
        });
    }

    let (resource, query) = match rest.split_once('?') {
        Some((resource, query)) => (resource, query),
        None => (rest, ""),
    };
    let params = url::form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    Ok(ParsedFsUrl {
        scheme: scheme.to_ascii_lowercase(),
        resource: resource.to_string(),
        params,
    })
}

/// Builds filesystems for one or more URL schemes.
pub trait Opener: Send + Sync {
    fn protocols(&self) -> &[&'static str];

    fn open_fs(&self, parsed: &ParsedFsUrl) -> Result<Box<dyn Filesystem>, FsError>;
}

/// Opens `youtube://` URLs as [`YoutubeFs`] instances.
pub struct YoutubeOpener {
    resolver: Arc<dyn VideoResolver>,
    opts: FsOptions,
}

impl YoutubeOpener {
    pub fn new(resolver: Arc<dyn VideoResolver>, opts: FsOptions) -> Self {
        Self { resolver, opts }
    }

    fn open(&self, id: &str, playlist: bool) -> Result<YoutubeFs, FsError> {
        let opts = if playlist {
            self.opts.clone().playlist()
        } else {
            self.opts.clone().video()
        };
        YoutubeFs::new(Arc::clone(&self.resolver), id, opts)
    }
}

impl Opener for YoutubeOpener {
    fn protocols(&self) -> &[&'static str] {
        &["youtube"]
    }

    fn open_fs(&self, parsed: &ParsedFsUrl) -> Result<Box<dyn Filesystem>, FsError> {
        if let Some(v) = parsed.params.get("v") {
            return Ok(Box::new(self.open(v, false)?));
        }
        if let Some(list) = parsed.params.get("list") {
            return Ok(Box::new(self.open(list, true)?));
        }
        match self.open(&parsed.resource, true) {
            Ok(fs) => Ok(Box::new(fs)),
            Err(FsError::InvalidId { .. }) => {
                tracing::debug!(resource = %parsed.resource, "not a playlist id; trying as video");
                Ok(Box::new(self.open(&parsed.resource, false)?))
            }
            Err(e) => Err(e),
        }
    }
}

/// Maps URL schemes to openers.
#[derive(Default)]
pub struct OpenerRegistry {
    openers: HashMap<String, Arc<dyn Opener>>,
}

impl OpenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the YouTube opener backed by yt-dlp.
    pub fn with_defaults(cfg: &YtfsConfig) -> Self {
        let resolver: Arc<dyn VideoResolver> = Arc::new(YtDlpResolver::from_config(cfg));
        let mut registry = Self::new();
        registry.register(Arc::new(YoutubeOpener::new(
            resolver,
            FsOptions::from_config(cfg),
        )));
        registry
    }

    /// Registers `opener` for each of its protocols, replacing earlier registrations.
    pub fn register(&mut self, opener: Arc<dyn Opener>) {
        for protocol in opener.protocols() {
            self.openers
                .insert(protocol.to_string(), Arc::clone(&opener));
        }
    }

    pub fn protocols(&self) -> Vec<&str> {
        let mut protocols: Vec<&str> = self.openers.keys().map(String::as_str).collect();
        protocols.sort_unstable();
        protocols
    }

    pub fn open_fs(&self, fs_url: &str) -> Result<Box<dyn Filesystem>, FsError> {
        let parsed = parse_fs_url(fs_url)?;
        let opener = self
            .openers
            .get(&parsed.scheme)
            .ok_or_else(|| FsError::UnsupportedProtocol {
                scheme: parsed.scheme.clone(),
            })?;
        tracing::debug!(scheme = %parsed.scheme, resource = %parsed.resource, "opening filesystem");
        opener.open_fs(&parsed)
    }
}

/// Opens `fs_url` with the default registry and the user's configuration.
pub fn open_fs(fs_url: &str) -> Result<Box<dyn Filesystem>, FsError> {
    let cfg = config::load_or_init().unwrap_or_else(|e| {
        tracing::warn!("using default configuration: {e:#}");
        YtfsConfig::default()
    });
    OpenerRegistry::with_defaults(&cfg).open_fs(fs_url)
}
