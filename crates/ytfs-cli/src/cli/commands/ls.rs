//! `ytfs ls` – list a directory.

use anyhow::{Context, Result};
use std::sync::Arc;
use ytfs_core::{Filesystem, OpenerRegistry};

use super::{prime, with_fs};

pub async fn run_ls(registry: Arc<OpenerRegistry>, fs_url: String, path: String) -> Result<()> {
    let names = with_fs(registry, fs_url, move |fs| list(fs, &path)).await?;
    for name in names {
        println!("{name}");
    }
    Ok(())
}

/// Lists `path`. A file path is made known first, so it reports
/// "not a directory" rather than "not found".
fn list(fs: &dyn Filesystem, path: &str) -> Result<Vec<String>> {
    prime(fs, path)?;
    fs.listdir(path).with_context(|| format!("list {path}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ytfs_core::resolver::{Playlist, ResolveError, Stream, Video, VideoResolver};
    use ytfs_core::{FsError, FsOptions, YoutubeFs};

    struct OneVideo;

    impl VideoResolver for OneVideo {
        fn video(&self, id: &str) -> Result<Video, ResolveError> {
            Ok(Video {
                id: id.into(),
                title: "Sample Clip".into(),
                best: Stream {
                    extension: "mp4".into(),
                    ..Default::default()
                },
                ..Default::default()
            })
        }

        fn playlist(&self, id: &str) -> Result<Playlist, ResolveError> {
            Err(ResolveError::InvalidId(id.into()))
        }
    }

    fn fs() -> YoutubeFs {
        YoutubeFs::new(Arc::new(OneVideo), "cpPG0bKHYKc", FsOptions::default().video()).unwrap()
    }

    #[test]
    fn lists_root() {
        assert_eq!(list(&fs(), "/").unwrap(), vec!["Sample Clip.mp4"]);
    }

    #[test]
    fn file_path_is_not_a_directory() {
        let err = list(&fs(), "/Sample Clip.mp4").unwrap_err();
        assert!(
            matches!(
                err.downcast_ref::<FsError>(),
                Some(FsError::DirectoryExpected { .. })
            ),
            "{err:#}"
        );
        let err = list(&fs(), "/nope.mp4").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FsError>(),
            Some(FsError::ResourceNotFound { .. })
        ));
    }
}
