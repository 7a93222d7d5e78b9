//! Checksum command: compute SHA-256 of a remote file.

use anyhow::{Context, Result};
use std::sync::Arc;
use ytfs_core::{checksum, OpenerRegistry};

use super::{prime, with_fs};

/// Compute and print SHA-256 of the given file.
pub async fn run_checksum(
    registry: Arc<OpenerRegistry>,
    fs_url: String,
    path: String,
) -> Result<()> {
    let shown = path.clone();
    let digest = with_fs(registry, fs_url, move |fs| {
        prime(fs, &path)?;
        let mut file = fs
            .openbin(&path, "rb")
            .with_context(|| format!("open {path}"))?;
        let digest = checksum::sha256_reader(&mut file)?;
        file.close();
        Ok(digest)
    })
    .await?;
    println!("{}  {}", digest, shown);
    Ok(())
}
