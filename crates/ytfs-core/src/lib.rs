pub mod config;
pub mod logging;

pub mod checksum;
pub mod error;
pub mod filesystem;
pub mod http;
pub mod info;
pub mod mode;
pub mod opener;
pub mod path;
pub mod resolver;
pub mod retry;
pub mod youtube;

pub use error::FsError;
pub use filesystem::{Filesystem, FsMeta};
pub use http::RemoteFile;
pub use info::{Info, Namespaces, ResourceType};
pub use opener::{open_fs, OpenerRegistry};
pub use youtube::{FsOptions, YoutubeFs};
