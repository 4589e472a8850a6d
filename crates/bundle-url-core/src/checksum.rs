//! Bundle checksum verification (SHA-512, as published in `release.properties`).

use anyhow::{Context, Result};
use sha2::{Digest, Sha512};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const BUF_SIZE: usize = 64 * 1024;

/// Compute SHA-512 of a file and return the digest as lowercase hex.
/// Reads in chunks to keep memory use bounded; bundles run to hundreds of MB.
pub fn sha512_path(path: &Path) -> Result<String> {
    let mut f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut hasher = Sha512::new();
    let mut buf = vec![0u8; BUF_SIZE];
    loop {
        let n = f
            .read(&mut buf)
            .with_context(|| format!("read {}", path.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    let digest = hasher.finalize();
    Ok(hex::encode(digest))
}

/// Check `path` against an expected hex digest (case-insensitive).
/// Returns the computed digest on match.
pub fn verify_sha512(path: &Path, expected: &str) -> Result<String> {
    let actual = sha512_path(path)?;
    let expected = expected.trim();
    if !actual.eq_ignore_ascii_case(expected) {
        anyhow::bail!(
            "checksum mismatch for {}: expected {}, got {}",
            path.display(),
            expected.to_ascii_lowercase(),
            actual
        );
    }
    tracing::debug!(path = %path.display(), "sha512 verified");
    Ok(actual)
}
