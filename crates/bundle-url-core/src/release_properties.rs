//! `release.properties` parsing.
//!
//! Release directories publish a Java-style properties file next to the
//! bundle. Only `key=value` lines matter; everything else is skipped.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Raw key/value view of a properties file.
pub type Properties = BTreeMap<String, String>;

/// Parses properties text: key and value are trimmed, lines without `=` or
/// with an empty key are skipped, as are `#` and `!` comments.
pub fn parse_properties(text: &str) -> Properties {
    let mut props = Properties::new();
    for line in text.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        props.insert(key.to_string(), value.trim().to_string());
    }
    props
}

pub fn read_properties(path: &Path) -> Result<Properties> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read properties file: {}", path.display()))?;
    Ok(parse_properties(&text))
}

/// Known release properties; absent keys become empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReleaseProperties {
    pub app_server_tomcat_version: String,
    pub build_timestamp: String,
    pub bundle_checksum_sha512: String,
    pub bundle_url: String,
    pub git_hash_liferay_docker: String,
    #[serde(rename = "gitHashLiferayPortalEE")]
    pub git_hash_liferay_portal_ee: String,
    pub liferay_docker_image: String,
    pub liferay_docker_tags: String,
    pub liferay_product_version: String,
    pub release_date: String,
    pub target_platform_version: String,
}

impl ReleaseProperties {
    pub fn from_properties(props: &Properties) -> Self {
        let get = |key: &str| props.get(key).cloned().unwrap_or_default();
        Self {
            app_server_tomcat_version: get("app.server.tomcat.version"),
            build_timestamp: get("build.timestamp"),
            bundle_checksum_sha512: get("bundle.checksum.sha512"),
            bundle_url: get("bundle.url"),
            git_hash_liferay_docker: get("git.hash.liferay-docker"),
            git_hash_liferay_portal_ee: get("git.hash.liferay-portal-ee"),
            liferay_docker_image: get("liferay.docker.image"),
            liferay_docker_tags: get("liferay.docker.tags"),
            liferay_product_version: get("liferay.product.version"),
            release_date: get("release.date"),
            target_platform_version: get("target.platform.version"),
        }
    }

    pub fn read(path: &Path) -> Result<Self> {
        Ok(Self::from_properties(&read_properties(path)?))
    }
}
