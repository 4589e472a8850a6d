//! Release listings grouped by edition and product group version.
//!
//! Input is a `releases.json` document: an array of release entries as
//! published by the release site. Quarterly DXP releases (`2024.q1`, ...)
//! belong to the 7.4 line.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

use crate::config::ReleasesConfig;
use crate::release_properties::ReleaseProperties;

/// Product group every quarterly DXP release is filed under.
pub const QUARTERLY_GROUP_VERSION: &str = "7.4";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Release {
    pub product: String,
    pub product_group_version: String,
    pub product_version: String,
    pub promoted: String,
    pub release_key: String,
    pub target_platform_version: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_properties: Option<ReleaseProperties>,
}

impl Release {
    /// The product group version this release is listed under.
    pub fn group_version(&self) -> &str {
        if self.product == "dxp" && self.product_group_version.contains(".q") {
            QUARTERLY_GROUP_VERSION
        } else {
            &self.product_group_version
        }
    }

    /// Where this release's `release.properties` lives below `root`: the
    /// path of the release URL, e.g. `root/dxp/7.4.13-u76/release.properties`.
    pub fn properties_path(&self, root: &Path) -> Result<PathBuf> {
        let url = Url::parse(&self.url)
            .with_context(|| format!("parse release url {:?}", self.url))?;
        let mut path = root.to_path_buf();
        for segment in url.path_segments().into_iter().flatten() {
            if !segment.is_empty() {
                path.push(segment);
            }
        }
        path.push("release.properties");
        Ok(path)
    }
}

pub fn parse_releases(text: &str) -> Result<Vec<Release>> {
    serde_json::from_str(text).context("parse releases.json")
}

pub fn read_releases(path: &Path) -> Result<Vec<Release>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read releases file: {}", path.display()))?;
    parse_releases(&text)
}

/// Attaches `release.properties` found under `root` to each release.
/// Releases without a local properties file are left as they are.
/// Returns how many were attached.
pub fn attach_properties(releases: &mut [Release], root: &Path) -> Result<usize> {
    let mut attached = 0;
    for release in releases.iter_mut() {
        let path = release.properties_path(root)?;
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "no release.properties");
            continue;
        }
        release.release_properties = Some(ReleaseProperties::read(&path)?);
        attached += 1;
    }
    Ok(attached)
}

/// One file written by [`write_release_files`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenReleases {
    pub file_name: String,
    pub count: usize,
}

/// Releases of `edition` listed under `version`, in input order.
pub fn releases_for<'a>(releases: &'a [Release], edition: &str, version: &str) -> Vec<&'a Release> {
    releases
        .iter()
        .filter(|r| r.product == edition && r.group_version() == version)
        .collect()
}

/// Writes `<edition>_releases.json` (every configured version, newest line
/// first) for each edition, then `<edition>_<ver>_releases.json` per version.
pub fn write_release_files(
    releases: &[Release],
    cfg: &ReleasesConfig,
    out_dir: &Path,
) -> Result<Vec<WrittenReleases>> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("create output dir {}", out_dir.display()))?;

    let mut written = Vec::new();
    for edition in &cfg.editions {
        let all: Vec<&Release> = cfg
            .versions
            .iter()
            .flat_map(|version| releases_for(releases, edition, version))
            .collect();
        written.push(write_releases(out_dir, &format!("{edition}_releases.json"), &all)?);
    }
    for edition in &cfg.editions {
        for version in &cfg.versions {
            let file_name = format!("{edition}_{}_releases.json", version.replace('.', ""));
            let group = releases_for(releases, edition, version);
            written.push(write_releases(out_dir, &file_name, &group)?);
        }
    }
    Ok(written)
}

fn write_releases(out_dir: &Path, file_name: &str, releases: &[&Release]) -> Result<WrittenReleases> {
    let path = out_dir.join(file_name);
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b" "));
    releases
        .serialize(&mut ser)
        .with_context(|| format!("serialize {file_name}"))?;
    fs::write(&path, buf).with_context(|| format!("write {}", path.display()))?;
    tracing::debug!(path = %path.display(), count = releases.len(), "wrote releases");
    Ok(WrittenReleases {
        file_name: file_name.to_string(),
        count: releases.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    const RELEASES: &str = r#"[
        {"product": "dxp", "productGroupVersion": "2024.q1", "productVersion": "DXP 2024.Q1.1", "releaseKey": "dxp-2024.q1.1", "url": "https://releases.liferay.com/dxp/2024.q1.1"},
        {"product": "dxp", "productGroupVersion": "7.4", "productVersion": "DXP 7.4 U76", "releaseKey": "dxp-7.4-u76", "url": "https://releases.liferay.com/dxp/7.4.13-u76"},
        {"product": "dxp", "productGroupVersion": "7.3", "releaseKey": "dxp-7.3-u20", "url": "https://releases.liferay.com/dxp/7.3.10-u20"},
        {"product": "portal", "productGroupVersion": "7.4", "releaseKey": "portal-7.4-ga80", "url": "https://releases.liferay.com/portal/7.4.3.80-ga80"},
        {"product": "portal", "productGroupVersion": "2024.q1", "releaseKey": "portal-odd", "url": "https://releases.liferay.com/portal/odd"},
        {"product": "commerce", "productGroupVersion": "7.4", "releaseKey": "commerce-1", "url": "https://releases.liferay.com/commerce/1"}
    ]"#;

    fn keys(dir: &Path, file: &str) -> Vec<String> {
        let text = fs::read_to_string(dir.join(file)).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["releaseKey"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn quarterly_dxp_releases_join_74() {
        let releases = parse_releases(RELEASES).unwrap();
        assert_eq!(releases[0].group_version(), "7.4");
        assert_eq!(releases[1].group_version(), "7.4");
        assert_eq!(releases[2].group_version(), "7.3");
        // Only DXP has quarterly releases.
        assert_eq!(releases[4].group_version(), "2024.q1");
        let dxp74: Vec<_> = releases_for(&releases, "dxp", "7.4")
            .iter()
            .map(|r| r.release_key.as_str())
            .collect();
        assert_eq!(dxp74, vec!["dxp-2024.q1.1", "dxp-7.4-u76"]);
    }

    #[test]
    fn writes_edition_and_version_files() {
        let dir = tempfile::tempdir().unwrap();
        let releases = parse_releases(RELEASES).unwrap();
        let written = write_release_files(&releases, &ReleasesConfig::default(), dir.path()).unwrap();

        // 2 editions + 2 editions x 5 versions
        assert_eq!(written.len(), 12);
        assert_eq!(
            keys(dir.path(), "dxp_releases.json"),
            vec!["dxp-2024.q1.1", "dxp-7.4-u76", "dxp-7.3-u20"]
        );
        assert_eq!(keys(dir.path(), "portal_releases.json"), vec!["portal-7.4-ga80"]);
        assert_eq!(keys(dir.path(), "dxp_73_releases.json"), vec!["dxp-7.3-u20"]);
        assert!(keys(dir.path(), "portal_70_releases.json").is_empty());
        assert!(!dir.path().join("commerce_releases.json").exists());
    }

    #[test]
    fn output_is_space_indented() {
        let dir = tempfile::tempdir().unwrap();
        let releases = parse_releases(r#"[{"product": "dxp", "productGroupVersion": "7.0"}]"#).unwrap();
        write_release_files(&releases, &ReleasesConfig::default(), dir.path()).unwrap();
        let text = fs::read_to_string(dir.path().join("dxp_70_releases.json")).unwrap();
        assert!(text.starts_with("[\n {\n  \"product\": \"dxp\","));
        let empty = fs::read_to_string(dir.path().join("dxp_74_releases.json")).unwrap();
        assert_eq!(empty, "[]");
    }

    #[test]
    fn properties_path_follows_release_url() {
        let release = Release {
            url: "https://releases.liferay.com/dxp/7.4.13-u76".into(),
            ..Release::default()
        };
        assert_eq!(
            release.properties_path(Path::new("releases")).unwrap(),
            Path::new("releases/dxp/7.4.13-u76/release.properties")
        );
    }

    #[test]
    fn attaches_local_release_properties() {
        let dir = tempfile::tempdir().unwrap();
        let props_dir = dir.path().join("dxp").join("7.4.13-u76");
        fs::create_dir_all(&props_dir).unwrap();
        fs::write(props_dir.join("release.properties"), "release.date=2023-05-12\n").unwrap();

        let mut releases = parse_releases(RELEASES).unwrap();
        assert_eq!(attach_properties(&mut releases, dir.path()).unwrap(), 1);
        let props = releases[1].release_properties.as_ref().unwrap();
        assert_eq!(props.release_date, "2023-05-12");
        assert!(releases[0].release_properties.is_none());

        let json = serde_json::to_value(&releases[1]).unwrap();
        assert_eq!(json["releaseProperties"]["releaseDate"], "2023-05-12");
        assert!(serde_json::to_value(&releases[0]).unwrap().get("releaseProperties").is_none());
    }

    #[test]
    fn malformed_releases_json_errs() {
        assert!(parse_releases(r#"{"not": "an array"}"#).is_err());
    }
}
