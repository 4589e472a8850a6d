//! `bundle-url release-info <release.properties>` – print release properties as JSON.

use anyhow::Result;
use bundle_url_core::release_properties::ReleaseProperties;
use std::path::Path;

pub fn run_release_info(path: &Path) -> Result<()> {
    let release = ReleaseProperties::read(path)?;
    println!("{}", serde_json::to_string_pretty(&release)?);
    Ok(())
}
