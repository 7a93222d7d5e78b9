//! `ytfs info` – print the raw info of a path.

use anyhow::{Context, Result};
use std::sync::Arc;
use ytfs_core::{Namespaces, OpenerRegistry};

use super::{prime, with_fs};

pub async fn run_info(
    registry: Arc<OpenerRegistry>,
    fs_url: String,
    path: String,
    namespaces: Vec<String>,
) -> Result<()> {
    let namespaces: Namespaces = namespaces.iter().collect();
    let info = with_fs(registry, fs_url, move |fs| {
        prime(fs, &path)?;
        fs.getinfo(&path, &namespaces)
            .with_context(|| format!("getinfo {path}"))
    })
    .await?;
    println!("{}", serde_json::to_string_pretty(info.raw())?);
    Ok(())
}
