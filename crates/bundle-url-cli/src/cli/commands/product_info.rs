//! `bundle-url product-info <path>` – write derived catalogs from a product catalog.

use anyhow::Result;
use bundle_url_core::config::BundleUrlConfig;
use bundle_url_core::product_info::{self, Catalog};
use std::path::Path;

pub fn run_product_info(
    cfg: &BundleUrlConfig,
    path: &Path,
    out_dir: Option<&Path>,
    decode_bundle_urls: bool,
) -> Result<()> {
    let mut catalog = Catalog::read(path)?;
    tracing::info!(path = %path.display(), products = catalog.len(), "read product catalog");

    if decode_bundle_urls {
        let codec = cfg.codec();
        let decoded = catalog.decode_bundle_urls(&codec)?;
        println!("Decoded {decoded} bundle URLs");
    }

    let out_dir = out_dir
        .or(cfg.product_info.output_dir.as_deref())
        .unwrap_or_else(|| Path::new("."));
    let written = product_info::write_catalogs(&catalog, &cfg.product_info, out_dir)?;
    for w in written {
        println!("Wrote {} ({} products)", w.file_name, w.count);
    }
    Ok(())
}
