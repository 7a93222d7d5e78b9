//! `ytfs cat` – write file bytes to stdout.

use anyhow::{Context, Result};
use std::io::{self, Read, Seek, SeekFrom};
use std::sync::Arc;
use ytfs_core::{FsError, OpenerRegistry};

use super::{prime, with_fs};

pub async fn run_cat(
    registry: Arc<OpenerRegistry>,
    fs_url: String,
    path: String,
    offset: u64,
    length: Option<u64>,
) -> Result<()> {
    with_fs(registry, fs_url, move |fs| {
        prime(fs, &path)?;
        let mut file = fs
            .openbin(&path, "rb")
            .with_context(|| format!("open {path}"))?;
        if offset > 0 {
            file.seek(SeekFrom::Start(offset))
                .map_err(FsError::from_io)
                .with_context(|| format!("seek {path} to {offset}"))?;
        }
        let mut stdout = io::stdout().lock();
        let copied = match length {
            Some(n) => io::copy(&mut (&mut file).take(n), &mut stdout),
            None => io::copy(&mut file, &mut stdout),
        }
        .with_context(|| format!("read {path}"))?;
        tracing::debug!(%path, offset, copied, "cat finished");
        file.close();
        Ok(())
    })
    .await
}
