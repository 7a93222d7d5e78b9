//! `ytfs get` – copy a remote file to disk.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;
use ytfs_core::{path as vpath, OpenerRegistry};

use super::{prime, with_fs};

/// Local destination: `output`, or the remote file name in the current directory.
fn destination(path: &str, output: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(out) = output {
        return Ok(out);
    }
    let normalized = vpath::normalize(path)?;
    let name = vpath::basename(&normalized);
    anyhow::ensure!(!name.is_empty(), "cannot derive a file name from {path:?}; use --output");
    Ok(PathBuf::from(name))
}

pub async fn run_get(
    registry: Arc<OpenerRegistry>,
    fs_url: String,
    path: String,
    output: Option<PathBuf>,
) -> Result<()> {
    let dest = destination(&path, output)?;
    let (written, dest) = with_fs(registry, fs_url, move |fs| {
        prime(fs, &path)?;
        let mut file = fs
            .openbin(&path, "rb")
            .with_context(|| format!("open {path}"))?;
        let out = File::create(&dest).with_context(|| format!("create {}", dest.display()))?;
        let mut out = BufWriter::new(out);
        let written = io::copy(&mut file, &mut out).with_context(|| format!("copy {path}"))?;
        out.flush()
            .with_context(|| format!("write {}", dest.display()))?;
        file.close();
        tracing::info!(%path, dest = %dest.display(), written, "file copied");
        Ok((written, dest))
    })
    .await?;
    println!("{} bytes -> {}", written, dest.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_defaults_to_basename() {
        assert_eq!(
            destination("/Sample Clip.mp4", None).unwrap(),
            PathBuf::from("Sample Clip.mp4")
        );
        assert_eq!(
            destination("/x.mp4", Some(PathBuf::from("/tmp/y.mp4"))).unwrap(),
            PathBuf::from("/tmp/y.mp4")
        );
        assert!(destination("/", None).is_err());
    }
}
