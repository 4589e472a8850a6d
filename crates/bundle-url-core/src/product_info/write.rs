//! Derived catalog files.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::Path;

use super::{Catalog, Product};
use crate::config::ProductInfoConfig;

pub const ALL_PRODUCTS_FILE: &str = "better_product_info.json";
pub const PROMOTED_PRODUCTS_FILE: &str = "promoted_product_info.json";

/// One file written by [`write_catalogs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenCatalog {
    pub file_name: String,
    pub count: usize,
}

/// Writes every derived catalog into `out_dir` (created if missing):
/// all products, promoted products, one file per product type, and one per
/// versioned type and version.
pub fn write_catalogs(
    catalog: &Catalog,
    cfg: &ProductInfoConfig,
    out_dir: &Path,
) -> Result<Vec<WrittenCatalog>> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("create output dir {}", out_dir.display()))?;

    let mut written = Vec::new();
    let all: Vec<&Product> = catalog.products().iter().collect();
    written.push(write_products(out_dir, ALL_PRODUCTS_FILE, &all)?);
    written.push(write_products(
        out_dir,
        PROMOTED_PRODUCTS_FILE,
        &catalog.promoted(),
    )?);

    for product_type in &cfg.product_types {
        let products = catalog.with_name_prefix(&format!("{product_type}-"));
        let file_name = format!("{product_type}_product_info.json");
        written.push(write_products(out_dir, &file_name, &products)?);
    }

    for product_type in &cfg.versioned_types {
        for version in &cfg.versions {
            let mut products = catalog.with_name_prefix(&format!("{product_type}-{version}"));
            if cfg.is_reversed(product_type, version) {
                products.reverse();
            }
            let file_name = format!(
                "{product_type}_{}_product_info.json",
                version.replace('.', "")
            );
            written.push(write_products(out_dir, &file_name, &products)?);
        }
    }

    Ok(written)
}

fn write_products(out_dir: &Path, file_name: &str, products: &[&Product]) -> Result<WrittenCatalog> {
    let path = out_dir.join(file_name);
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
    products
        .serialize(&mut ser)
        .with_context(|| format!("serialize {file_name}"))?;
    fs::write(&path, buf).with_context(|| format!("write {}", path.display()))?;
    tracing::debug!(path = %path.display(), count = products.len(), "wrote catalog");
    Ok(WrittenCatalog {
        file_name: file_name.to_string(),
        count: products.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    const CATALOG: &str = r#"{
        "commerce-2.0.7-7.2": {"promoted": "false"},
        "dxp-7.4-u76": {"promoted": "true"},
        "dxp-7.3-u20": {"promoted": "false"},
        "portal-7.2-ga1": {"promoted": "false"},
        "portal-7.2-ga2": {"promoted": "true"},
        "portal-7.4-ga80": {"promoted": "false"}
    }"#;

    fn names(dir: &Path, file: &str) -> Vec<String> {
        let text = fs::read_to_string(dir.join(file)).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn writes_grouped_catalogs() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::parse(CATALOG).unwrap();
        let written = write_catalogs(&catalog, &ProductInfoConfig::default(), dir.path()).unwrap();

        // all + promoted + 3 types + 2 types x 5 versions
        assert_eq!(written.len(), 15);
        assert_eq!(names(dir.path(), ALL_PRODUCTS_FILE).len(), 6);
        assert_eq!(
            names(dir.path(), PROMOTED_PRODUCTS_FILE),
            vec!["dxp-7.4-u76", "portal-7.2-ga2"]
        );
        assert_eq!(
            names(dir.path(), "dxp_product_info.json"),
            vec!["dxp-7.4-u76", "dxp-7.3-u20"]
        );
        assert_eq!(
            names(dir.path(), "commerce_product_info.json"),
            vec!["commerce-2.0.7-7.2"]
        );
        assert_eq!(names(dir.path(), "dxp_73_product_info.json"), vec!["dxp-7.3-u20"]);
        assert!(names(dir.path(), "dxp_70_product_info.json").is_empty());
    }

    #[test]
    fn reversed_versions_are_written_backwards() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::parse(CATALOG).unwrap();
        write_catalogs(&catalog, &ProductInfoConfig::default(), dir.path()).unwrap();
        assert_eq!(
            names(dir.path(), "portal_72_product_info.json"),
            vec!["portal-7.2-ga2", "portal-7.2-ga1"]
        );
    }

    #[test]
    fn output_is_tab_indented() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::parse(r#"{"dxp-7.4-u1": {"promoted": "true"}}"#).unwrap();
        write_catalogs(&catalog, &ProductInfoConfig::default(), dir.path()).unwrap();
        let text = fs::read_to_string(dir.path().join(PROMOTED_PRODUCTS_FILE)).unwrap();
        assert_eq!(
            text,
            "[\n\t{\n\t\t\"promoted\": \"true\",\n\t\t\"name\": \"dxp-7.4-u1\"\n\t}\n]"
        );
        let empty = fs::read_to_string(dir.path().join("portal_product_info.json")).unwrap();
        assert_eq!(empty, "[]");
    }

    #[test]
    fn creates_missing_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("out").join("catalog");
        let catalog = Catalog::parse("{}").unwrap();
        let written = write_catalogs(&catalog, &ProductInfoConfig::default(), &nested).unwrap();
        assert!(written.iter().all(|w| w.count == 0));
        assert!(nested.join(ALL_PRODUCTS_FILE).exists());
    }
}
