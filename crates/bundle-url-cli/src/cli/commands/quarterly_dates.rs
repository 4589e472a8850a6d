//! `bundle-url quarterly-dates <tags.json>...` – write quarterly release support dates.

use anyhow::Result;
use bundle_url_core::config::BundleUrlConfig;
use bundle_url_core::quarterly::{self, CSV_FILE, JSON_FILE};
use std::path::{Path, PathBuf};

pub fn run_quarterly_dates(
    cfg: &BundleUrlConfig,
    pages: &[PathBuf],
    out_dir: Option<&Path>,
    properties_dir: Option<&Path>,
) -> Result<()> {
    let pages = pages
        .iter()
        .map(|p| quarterly::read_tag_page(p))
        .collect::<Result<Vec<_>>>()?;
    let releases = quarterly::build_quarterly_releases(&pages, &cfg.quarterly, properties_dir)?;

    let out_dir = out_dir
        .or(cfg.quarterly.output_dir.as_deref())
        .unwrap_or_else(|| Path::new("."));
    quarterly::write_quarterly_files(&releases, out_dir)?;
    println!("Wrote {CSV_FILE} and {JSON_FILE} ({} releases)", releases.len());
    Ok(())
}
