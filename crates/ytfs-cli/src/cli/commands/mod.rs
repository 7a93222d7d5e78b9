//! CLI command handlers. Each command is in its own file.
//!
//! Filesystem calls block on HTTP and the resolver, so every handler runs
//! them on the blocking pool.

mod cat;
mod checksum;
mod get;
mod info;
mod ls;

pub use cat::run_cat;
pub use checksum::run_checksum;
pub use get::run_get;
pub use info::run_info;
pub use ls::run_ls;

use anyhow::{Context, Result};
use std::sync::Arc;
use ytfs_core::path;
use ytfs_core::{Filesystem, OpenerRegistry};

/// Opens `fs_url`, runs `f` on the blocking pool and closes the filesystem.
async fn with_fs<T, F>(registry: Arc<OpenerRegistry>, fs_url: String, f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&dyn Filesystem) -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let fs = registry
            .open_fs(&fs_url)
            .with_context(|| format!("open {fs_url}"))?;
        let out = f(fs.as_ref());
        fs.close();
        out
    })
    .await
    .context("filesystem task failed")?
}

/// Lists the parent directory so `path` is known to the filesystem.
fn prime(fs: &dyn Filesystem, file_path: &str) -> Result<()> {
    let normalized = path::normalize(file_path)?;
    if !path::is_root(&normalized) {
        fs.listdir(path::ROOT).context("list root")?;
    }
    Ok(())
}
