//! Support dates of quarterly releases.
//!
//! Quarterly releases are found in pages of the Docker Hub tag listing of
//! the DXP image. A quarter is represented by its first tag (`2024.q2.0`),
//! adjusted by the configured include/exclude lists. Premium support ends one
//! year after first ship; Q1 releases are LTS with three years of premium and
//! five years of limited support.

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::config::QuarterlyConfig;
use crate::release_properties::read_properties;

pub const CSV_FILE: &str = "quarterly_releases_dates.csv";
pub const JSON_FILE: &str = "quarterly_releases_dates.json";

const DATE_FORMAT: &str = "%Y-%m-%d";
const NOT_APPLICABLE: &str = "N/A";

/// One page of the tag listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagPage {
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub results: Vec<ImageTag>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageTag {
    pub name: String,
    /// RFC 3339 push time of the tag.
    pub tag_last_pushed: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarterlyRelease {
    /// `<year>.q<n>`
    pub name: String,
    pub first_ship_date_origin: String,
    pub first_ship_date: String,
    pub end_of_premium_support: String,
    pub end_of_limited_support: String,
    pub lts: bool,
}

pub fn read_tag_page(path: &Path) -> Result<TagPage> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read tag page: {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse tag page {}", path.display()))
}

/// `<4-digit year>.q<digit>.0`
pub fn is_first_quarterly_tag(name: &str) -> bool {
    let mut parts = name.split('.');
    let (Some(year), Some(quarter), Some(patch), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    let quarter = quarter.as_bytes();
    year.len() == 4
        && year.bytes().all(|b| b.is_ascii_digit())
        && quarter.len() == 2
        && quarter[0] == b'q'
        && quarter[1].is_ascii_digit()
        && patch == "0"
}

/// Tags that stand for a quarterly release, in listing order.
pub fn select_tags<'a>(tags: &'a [ImageTag], cfg: &QuarterlyConfig) -> Vec<&'a ImageTag> {
    let mut selected = Vec::new();
    for tag in tags {
        if cfg.include.contains(&tag.name) {
            selected.push(tag);
        }
        if is_first_quarterly_tag(&tag.name) && !cfg.exclude.contains(&tag.name) {
            selected.push(tag);
        }
    }
    selected
}

/// `date` moved `years` years ahead, less one day. Day overflow rolls into
/// the next month, so 2024-02-29 plus one year is 2025-02-28.
pub fn years_later_less_one_day(date: NaiveDate, years: i32) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(date.year() + years, date.month(), 1)?;
    first.checked_add_days(Days::new(u64::from(date.day0())))?
        .checked_sub_days(Days::new(1))
}

/// Builds the support dates of one tag. `release_date`, when known from the
/// tag's `release.properties`, takes precedence over the push date.
pub fn quarterly_release(tag: &ImageTag, release_date: Option<&str>) -> Result<QuarterlyRelease> {
    let mut parts = tag.name.split('.');
    let (Some(year), Some(quarter)) = (parts.next(), parts.next()) else {
        anyhow::bail!("tag {:?} is not a quarterly release", tag.name);
    };

    let (first_ship_date, origin) = match release_date {
        Some(date) => (
            date.to_string(),
            format!("https://releases-cdn.liferay.com/dxp/{}/release.properties", tag.name),
        ),
        None => {
            let pushed = DateTime::parse_from_rfc3339(&tag.tag_last_pushed)
                .with_context(|| format!("parse push time of tag {}", tag.name))?;
            (
                pushed.date_naive().format(DATE_FORMAT).to_string(),
                format!("https://hub.docker.com/r/liferay/dxp/tags?name={}", tag.name),
            )
        }
    };

    let shipped = NaiveDate::parse_from_str(&first_ship_date, DATE_FORMAT)
        .with_context(|| format!("parse first ship date {first_ship_date:?} of {}", tag.name))?;
    let lts = quarter.eq_ignore_ascii_case("q1");
    let support_end = |years| {
        years_later_less_one_day(shipped, years)
            .map(|d| d.format(DATE_FORMAT).to_string())
            .with_context(|| format!("support end of {} out of range", tag.name))
    };

    Ok(QuarterlyRelease {
        name: format!("{year}.{quarter}"),
        first_ship_date_origin: origin,
        first_ship_date,
        end_of_premium_support: support_end(if lts { 3 } else { 1 })?,
        end_of_limited_support: if lts {
            support_end(5)?
        } else {
            NOT_APPLICABLE.to_string()
        },
        lts,
    })
}

/// Release date from `<root>/<tag>/release.properties`, if present.
pub fn local_release_date(root: &Path, tag: &str) -> Result<Option<String>> {
    let path = root.join(tag).join("release.properties");
    if !path.is_file() {
        return Ok(None);
    }
    let props = read_properties(&path)?;
    Ok(props.get("release.date").filter(|d| !d.is_empty()).cloned())
}

/// Selects the quarterly tags across all pages and computes their dates,
/// latest first.
pub fn build_quarterly_releases(
    pages: &[TagPage],
    cfg: &QuarterlyConfig,
    properties_dir: Option<&Path>,
) -> Result<Vec<QuarterlyRelease>> {
    let mut releases = Vec::new();
    for page in pages {
        for tag in select_tags(&page.results, cfg) {
            let release_date = match properties_dir {
                Some(root) => local_release_date(root, &tag.name)?,
                None => None,
            };
            releases.push(quarterly_release(tag, release_date.as_deref())?);
        }
    }
    releases.sort_by(|a, b| b.first_ship_date.cmp(&a.first_ship_date));
    Ok(releases)
}

pub fn to_csv(releases: &[QuarterlyRelease]) -> Result<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record([
        "name",
        "firstShipDateOrigin",
        "firstShipDate",
        "endOfPremiumSupport",
        "endOfLimitedSupport",
    ])?;
    for r in releases {
        wtr.write_record([
            &r.name,
            &r.first_ship_date_origin,
            &r.first_ship_date,
            &r.end_of_premium_support,
            &r.end_of_limited_support,
        ])?;
    }
    wtr.flush().context("flush csv")?;
    wtr.into_inner()
        .map_err(|err| anyhow::anyhow!("flush csv: {}", err.error()))
}

/// Writes the CSV and JSON tables into `out_dir`.
pub fn write_quarterly_files(releases: &[QuarterlyRelease], out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("create output dir {}", out_dir.display()))?;
    let csv_path = out_dir.join(CSV_FILE);
    fs::write(&csv_path, to_csv(releases)?)
        .with_context(|| format!("write {}", csv_path.display()))?;
    let json_path = out_dir.join(JSON_FILE);
    fs::write(&json_path, serde_json::to_vec(releases)?)
        .with_context(|| format!("write {}", json_path.display()))?;
    tracing::debug!(dir = %out_dir.display(), count = releases.len(), "wrote quarterly dates");
    Ok(())
}
