//! `bundle-url encode <url> <key>` – produce a bundle reference.

use anyhow::{Context, Result};
use bundle_url_core::config::BundleUrlConfig;

pub fn run_encode(cfg: &BundleUrlConfig, url: &str, key: &str, metadata: Option<&str>) -> Result<()> {
    let encoded = cfg
        .codec()
        .encode(url, metadata, &key.into())
        .with_context(|| format!("encode {url}"))?;
    println!("{encoded}");
    Ok(())
}
