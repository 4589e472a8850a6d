use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::codec::{BundleUrlCodec, DEFAULT_ALLOWED_SCHEMES};

/// Catalog output settings (optional `[product_info]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductInfoConfig {
    /// Directory the derived catalogs are written to (None = current directory).
    pub output_dir: Option<PathBuf>,
    /// Product types that get an unversioned `<type>_product_info.json`.
    pub product_types: Vec<String>,
    /// Product types that also get per-version files.
    pub versioned_types: Vec<String>,
    /// Product group versions, e.g. "7.4".
    pub versions: Vec<String>,
    /// `type version` pairs whose per-version file lists products in reverse order.
    pub reverse_versions: Vec<String>,
}

impl Default for ProductInfoConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            product_types: vec!["dxp".into(), "portal".into(), "commerce".into()],
            versioned_types: vec!["dxp".into(), "portal".into()],
            versions: ["7.4", "7.3", "7.2", "7.1", "7.0"]
                .into_iter()
                .map(String::from)
                .collect(),
            reverse_versions: vec!["portal 7.2".into(), "portal 7.1".into()],
        }
    }
}

impl ProductInfoConfig {
    pub fn is_reversed(&self, product_type: &str, version: &str) -> bool {
        self.reverse_versions.iter().any(|entry| {
            let mut parts = entry.split_whitespace();
            parts.next() == Some(product_type) && parts.next() == Some(version)
        })
    }
}

/// Release listing output (optional `[releases]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleasesConfig {
    pub output_dir: PathBuf,
    /// Products that get `<edition>[_<ver>]_releases.json` files.
    pub editions: Vec<String>,
    pub versions: Vec<String>,
}

impl Default for ReleasesConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("releases"),
            editions: vec!["dxp".into(), "portal".into()],
            versions: ["7.4", "7.3", "7.2", "7.1", "7.0"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Quarterly support dates output (optional `[quarterly]` section).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuarterlyConfig {
    /// Directory for the CSV and JSON files (None = current directory).
    pub output_dir: Option<PathBuf>,
    /// Tags listed even though they are not a `<year>.q<n>.0` tag.
    pub include: Vec<String>,
    /// `<year>.q<n>.0` tags left out.
    pub exclude: Vec<String>,
}

impl Default for QuarterlyConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            include: vec!["2024.q1.1".into(), "2023.q3.1".into()],
            exclude: vec!["2024.q1.0".into(), "2023.q3.0".into()],
        }
    }
}

/// Global configuration loaded from `~/.config/bundle-url/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleUrlConfig {
    /// URL schemes a decoded reference may use.
    #[serde(default = "default_allowed_schemes")]
    pub allowed_schemes: Vec<String>,
    #[serde(default)]
    pub product_info: ProductInfoConfig,
    #[serde(default)]
    pub releases: ReleasesConfig,
    #[serde(default)]
    pub quarterly: QuarterlyConfig,
}

fn default_allowed_schemes() -> Vec<String> {
    DEFAULT_ALLOWED_SCHEMES.iter().map(|s| s.to_string()).collect()
}

impl Default for BundleUrlConfig {
    fn default() -> Self {
        Self {
            allowed_schemes: default_allowed_schemes(),
            product_info: ProductInfoConfig::default(),
            releases: ReleasesConfig::default(),
            quarterly: QuarterlyConfig::default(),
        }
    }
}

impl BundleUrlConfig {
    /// Codec honoring the configured scheme allow-list.
    pub fn codec(&self) -> BundleUrlCodec {
        BundleUrlCodec::with_allowed_schemes(self.allowed_schemes.iter().cloned())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("bundle-url")
        .context("locate XDG config dir")?;
    Ok(xdg_dirs.get_config_file("config.toml"))
}

/// Load configuration from disk, creating a default file if none exists.
///
/// A default file that cannot be written is not fatal: the defaults are
/// used and a warning is logged.
pub fn load_or_init() -> Result<BundleUrlConfig> {
    load_or_init_at(&config_path()?)
}

pub(crate) fn load_or_init_at(path: &Path) -> Result<BundleUrlConfig> {
    if path.exists() {
        return load_from(path);
    }
    let default_cfg = BundleUrlConfig::default();
    match write_default(path, &default_cfg) {
        Ok(()) => tracing::info!("created default config at {}", path.display()),
        Err(err) => tracing::warn!("using default config: {:#}", err),
    }
    Ok(default_cfg)
}

fn write_default(path: &Path, cfg: &BundleUrlConfig) -> Result<()> {
    let toml = toml::to_string_pretty(cfg).context("serialize default config")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config {}", path.display()))?;
    }
    fs::write(path, toml).with_context(|| format!("create config {}", path.display()))?;
    Ok(())
}

/// Load configuration from an explicit file; it must exist.
pub fn load_from(path: &Path) -> Result<BundleUrlConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let cfg: BundleUrlConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
