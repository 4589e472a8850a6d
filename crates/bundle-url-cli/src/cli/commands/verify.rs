//! `bundle-url verify <file> <release.properties>` – check a downloaded bundle.

use anyhow::Result;
use bundle_url_core::checksum;
use bundle_url_core::release_properties::ReleaseProperties;
use std::path::Path;

/// Compares the SHA-512 of `file` with `bundle.checksum.sha512` from `properties`.
pub fn run_verify(file: &Path, properties: &Path) -> Result<()> {
    let release = ReleaseProperties::read(properties)?;
    if release.bundle_checksum_sha512.is_empty() {
        anyhow::bail!("{} has no bundle.checksum.sha512", properties.display());
    }
    let digest = checksum::verify_sha512(file, &release.bundle_checksum_sha512)?;
    println!("OK {}  {}", digest, file.display());
    Ok(())
}
