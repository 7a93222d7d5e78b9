//! Virtual path handling.
//!
//! Paths inside a filesystem are `/`-separated, absolute and normalized:
//! `""`, `"."`, `"./"` and `"/"` all name the root.

use crate::error::FsError;

pub const ROOT: &str = "/";

/// Normalizes a path: collapses empty and `.` segments, resolves `..` and
/// returns an absolute path. Backslashes are treated as ordinary characters.
pub fn normalize(path: &str) -> Result<String, FsError> {
    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if parts.pop().is_none() {
                    return Err(FsError::IllegalBackReference {
                        path: path.to_string(),
                    });
                }
            }
            s => parts.push(s),
        }
    }
    if parts.is_empty() {
        return Ok(ROOT.to_string());
    }
    Ok(format!("/{}", parts.join("/")))
}

/// Normalizes `path` and rejects any character listed in `invalid_chars`.
pub fn validate(path: &str, invalid_chars: &str) -> Result<String, FsError> {
    let normalized = normalize(path)?;
    if let Some(c) = normalized.chars().find(|c| invalid_chars.contains(*c)) {
        return Err(FsError::InvalidPath {
            path: path.to_string(),
            reason: format!("contains invalid character {c:?}"),
        });
    }
    Ok(normalized)
}

pub fn is_root(normalized: &str) -> bool {
    normalized == ROOT
}

/// Last component of a normalized path (`""` for the root).
pub fn basename(normalized: &str) -> &str {
    normalized.rsplit('/').next().unwrap_or("")
}

/// Joins a file name onto a directory path.
pub fn join(dir: &str, name: &str) -> String {
    if dir.ends_with('/') {
        format!("{dir}{name}")
    } else {
        format!("{dir}/{name}")
    }
}
