//! `bundle-url [decode] <encoded> <key>` – print the decoded download URL.

use anyhow::{Context, Result};
use bundle_url_core::bundle::DecodedBundle;
use bundle_url_core::codec::BundleDecoder;
use bundle_url_core::config::BundleUrlConfig;

/// How a decoded bundle is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeOutput {
    /// The URL alone, one line.
    Url,
    /// The URL, then the metadata line if any.
    WithMetadata,
    Json,
}

pub fn run_decode(cfg: &BundleUrlConfig, encoded: &str, key: &str, output: DecodeOutput) -> Result<()> {
    let codec = cfg.codec();
    let bundle = decode_with(&codec, encoded, key)?;
    tracing::info!(url = %bundle.url, "decoded bundle reference");
    println!("{}", render(&bundle, output)?);
    Ok(())
}

fn decode_with(decoder: &dyn BundleDecoder, encoded: &str, key: &str) -> Result<DecodedBundle> {
    decoder
        .decode(&encoded.into(), &key.into())
        .context("decode bundle reference")
}

fn render(bundle: &DecodedBundle, output: DecodeOutput) -> Result<String> {
    Ok(match output {
        DecodeOutput::Url => bundle.url.to_string(),
        DecodeOutput::WithMetadata => match &bundle.metadata {
            Some(metadata) => format!("{}\n{}", bundle.url, metadata),
            None => bundle.url.to_string(),
        },
        DecodeOutput::Json => serde_json::to_string(bundle)?,
    })
}
