//! `bundle-url releases <releases.json>` – write release listings per edition and version.

use anyhow::Result;
use bundle_url_core::config::BundleUrlConfig;
use bundle_url_core::releases;
use std::path::Path;

pub fn run_releases(
    cfg: &BundleUrlConfig,
    path: &Path,
    out_dir: Option<&Path>,
    properties_dir: Option<&Path>,
) -> Result<()> {
    let mut all = releases::read_releases(path)?;
    tracing::info!(path = %path.display(), releases = all.len(), "read releases");

    if let Some(root) = properties_dir {
        let attached = releases::attach_properties(&mut all, root)?;
        println!("Attached release.properties to {attached} releases");
    }

    let out_dir = out_dir.unwrap_or(cfg.releases.output_dir.as_path());
    let written = releases::write_release_files(&all, &cfg.releases, out_dir)?;
    for w in written {
        println!("Wrote {} ({} releases)", w.file_name, w.count);
    }
    Ok(())
}
