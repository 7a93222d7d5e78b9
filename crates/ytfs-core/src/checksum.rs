//! SHA-256 of remote files.
//!
//! Hashing reads the stream in fixed chunks, so a whole video can be
//! verified without storing it.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::io::Read;

const BUF_SIZE: usize = 64 * 1024;

/// Compute SHA-256 of everything `reader` yields and return the digest as lowercase hex.
pub fn sha256_reader<R: Read>(reader: &mut R) -> Result<String> {
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; BUF_SIZE];
    loop {
        let n = reader.read(&mut buf).context("read stream")?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn sha256_empty_stream() {
        let digest = sha256_reader(&mut Cursor::new(Vec::new())).unwrap();
        assert_eq!(
            digest,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn sha256_known_content() {
        let digest = sha256_reader(&mut Cursor::new(b"hello\n".to_vec())).unwrap();
        assert_eq!(
            digest,
            "5891b5b522d5df086d0ff0b110fbd9d21bb4fc7163af34d08286a2e846f6be03"
        );
    }

    #[test]
    fn sha256_spans_multiple_chunks() {
        let data = vec![7u8; BUF_SIZE * 2 + 3];
        let mut one_shot = Sha256::new();
        one_shot.update(&data);
        let expected = hex::encode(one_shot.finalize());
        assert_eq!(sha256_reader(&mut Cursor::new(data)).unwrap(), expected);
    }
}
