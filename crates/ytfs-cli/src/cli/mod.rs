//! CLI for browsing YouTube playlists and videos as a filesystem.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use ytfs_core::config;
use ytfs_core::OpenerRegistry;

use commands::{run_cat, run_checksum, run_get, run_info, run_ls};

/// Top-level CLI for ytfs.
#[derive(Debug, Parser)]
#[command(name = "ytfs")]
#[command(
    about = "ytfs: YouTube playlists and videos as a read-only filesystem",
    long_about = None
)]
pub struct Cli {
    /// Open files as forward-only streams instead of seekable range readers.
    #[arg(long, global = true)]
    pub no_seek: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// List a directory (the root lists every video).
    Ls {
        /// Filesystem URL, e.g. youtube://PLxxxx or youtube://https://youtu.be/ID.
        fs_url: String,
        /// Directory inside the filesystem.
        #[arg(default_value = "/")]
        path: String,
    },

    /// Print the info of a path as JSON.
    Info {
        fs_url: String,
        path: String,
        /// Extra namespace to include (details, mediaproxy.media). Repeatable.
        #[arg(short = 'n', long = "namespace", value_name = "NAMESPACE")]
        namespaces: Vec<String>,
    },

    /// Write the bytes of a file to stdout.
    Cat {
        fs_url: String,
        path: String,
        /// Start reading at this byte offset (needs a seekable file).
        #[arg(long, default_value = "0", value_name = "N")]
        offset: u64,
        /// Stop after this many bytes.
        #[arg(long, value_name = "N")]
        length: Option<u64>,
    },

    /// Copy a file to local disk.
    Get {
        fs_url: String,
        path: String,
        /// Destination (default: the file name in the current directory).
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Compute SHA-256 of a remote file without storing it.
    Checksum { fs_url: String, path: String },
}

impl Cli {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let mut cfg = config::load_or_init()?;
        if cli.no_seek {
            cfg.seekable = false;
        }
        tracing::debug!("loaded config: {:?}", cfg);
        let registry = Arc::new(OpenerRegistry::with_defaults(&cfg));

        match cli.command {
            CliCommand::Ls { fs_url, path } => run_ls(registry, fs_url, path).await?,
            CliCommand::Info {
                fs_url,
                path,
                namespaces,
            } => run_info(registry, fs_url, path, namespaces).await?,
            CliCommand::Cat {
                fs_url,
                path,
                offset,
                length,
            } => run_cat(registry, fs_url, path, offset, length).await?,
            CliCommand::Get {
                fs_url,
                path,
                output,
            } => run_get(registry, fs_url, path, output).await?,
            CliCommand::Checksum { fs_url, path } => run_checksum(registry, fs_url, path).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
