//! Product catalog (`.product_info.json`) processing.
//!
//! The catalog maps product names to product objects whose `bundleUrl` and
//! `bundleChecksumMD5Url` are encoded references keyed by `releaseDate`.
//! Processing flattens it into a list (each product gains a `name`), can
//! decode those two URLs in place, and writes derived catalogs grouped by
//! promotion, product type and version.

mod write;

pub use write::{write_catalogs, WrittenCatalog};

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;

use crate::bundle::{DecodeKey, EncodedBundleReference};
use crate::codec::BundleDecoder;

/// Fields holding encoded references.
pub const ENCODED_FIELDS: [&str; 2] = ["bundleUrl", "bundleChecksumMD5Url"];
const KEY_FIELD: &str = "releaseDate";

/// One catalog entry. Field order and unknown fields are preserved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Product(Map<String, Value>);

impl Product {
    fn new(name: &str, mut fields: Map<String, Value>) -> Self {
        fields.insert("name".to_string(), Value::String(name.to_string()));
        Self(fields)
    }

    pub fn name(&self) -> &str {
        self.field("name").unwrap_or_default()
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Catalogs store the flag as the string `"true"`; a JSON boolean is accepted too.
    pub fn is_promoted(&self) -> bool {
        match self.0.get("promoted") {
            Some(Value::String(s)) => s == "true",
            Some(Value::Bool(b)) => *b,
            _ => false,
        }
    }

    /// Replaces every encoded field present with its decoded URL.
    /// Returns how many fields were decoded.
    fn decode_fields(&mut self, decoder: &dyn BundleDecoder) -> Result<usize> {
        let present: Vec<&str> = ENCODED_FIELDS
            .into_iter()
            .filter(|field| self.field(field).is_some_and(|v| !v.is_empty()))
            .collect();
        if present.is_empty() {
            return Ok(0);
        }

        let key = self
            .field(KEY_FIELD)
            .map(DecodeKey::from)
            .with_context(|| format!("product {} has no {KEY_FIELD}", self.name()))?;

        for field in &present {
            let encoded = EncodedBundleReference::from(self.field(field).unwrap_or_default());
            let decoded = decoder
                .decode(&encoded, &key)
                .with_context(|| format!("decode {field} of product {}", self.name()))?;
            self.0
                .insert(field.to_string(), Value::String(decoded.url.into_string()));
        }
        Ok(present.len())
    }
}

/// Flattened catalog, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn parse(json: &str) -> Result<Self> {
        let root: Map<String, Value> =
            serde_json::from_str(json).context("product catalog must be a JSON object")?;
        let products = root
            .into_iter()
            .map(|(name, value)| match value {
                Value::Object(fields) => Ok(Product::new(&name, fields)),
                _ => anyhow::bail!("product {name} is not a JSON object"),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { products })
    }

    pub fn read(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read product catalog: {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parse product catalog: {}", path.display()))
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Decodes the encoded URL fields of every product. Stops at the first
    /// product that fails; returns the number of decoded fields.
    pub fn decode_bundle_urls(&mut self, decoder: &dyn BundleDecoder) -> Result<usize> {
        let mut decoded = 0;
        for product in &mut self.products {
            decoded += product.decode_fields(decoder)?;
        }
        tracing::info!(products = self.products.len(), decoded, "decoded bundle URLs");
        Ok(decoded)
    }

    pub fn promoted(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_promoted()).collect()
    }

    pub fn with_name_prefix(&self, prefix: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.name().starts_with(prefix))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::BundleUrlCodec;

    const PUBLISHED: &str = "BodHRwczovL3JlbGVhc2VzLWNkbi5saWZlcmF5LmNvbS9keHAvNy40LjEzLXU3Ni9saWZlcmF5LWR4cC10b21jYXQtNy40LjEzLnU3Ni0yMDIzMDUwOTE2MDA0NDYwNy50YXIuZ3oAA=";

    fn sample() -> String {
        let codec = BundleUrlCodec::new();
        let md5 = codec
            .encode(
                "https://releases-cdn.liferay.com/dxp/7.4.13-u76/liferay-dxp-tomcat-7.4.13.u76-20230509160044607.tar.gz.MD5",
                None,
                &"5/12/2023".into(),
            )
            .unwrap();
        format!(
            r#"{{
                "dxp-7.4-u76": {{
                    "appServerTomcatVersion": "9.0.73",
                    "bundleUrl": "{PUBLISHED}",
                    "bundleChecksumMD5Url": "{md5}",
                    "promoted": "true",
                    "releaseDate": "5/12/2023"
                }},
                "portal-7.4-ga80": {{
                    "promoted": "false",
                    "releaseDate": "6/1/2023"
                }}
            }}"#
        )
    }

    #[test]
    fn parse_adds_names_in_input_order() {
        let catalog = Catalog::parse(&sample()).unwrap();
        let names: Vec<&str> = catalog.products().iter().map(Product::name).collect();
        assert_eq!(names, vec!["dxp-7.4-u76", "portal-7.4-ga80"]);
        // name is appended after the original fields
        let first = serde_json::to_value(&catalog.products()[0]).unwrap();
        let keys: Vec<&String> = first.as_object().unwrap().keys().collect();
        assert_eq!(keys.first().map(|k| k.as_str()), Some("appServerTomcatVersion"));
        assert_eq!(keys.last().map(|k| k.as_str()), Some("name"));
    }

    #[test]
    fn parse_rejects_non_object_entries() {
        assert!(Catalog::parse(r#"{"dxp-7.4-u1": "oops"}"#).is_err());
        assert!(Catalog::parse("[1, 2]").is_err());
    }

    #[test]
    fn decode_replaces_encoded_fields() {
        let mut catalog = Catalog::parse(&sample()).unwrap();
        let decoded = catalog.decode_bundle_urls(&BundleUrlCodec::new()).unwrap();
        assert_eq!(decoded, 2);
        let dxp = &catalog.products()[0];
        assert_eq!(
            dxp.field("bundleUrl"),
            Some("https://releases-cdn.liferay.com/dxp/7.4.13-u76/liferay-dxp-tomcat-7.4.13.u76-20230509160044607.tar.gz")
        );
        assert!(dxp.field("bundleChecksumMD5Url").unwrap().ends_with(".tar.gz.MD5"));
        // Products without encoded fields are left alone.
        assert_eq!(catalog.products()[1].field("bundleUrl"), None);
    }

    #[test]
    fn decode_failure_names_product() {
        let json = format!(
            r#"{{"dxp-7.4-u76": {{"bundleUrl": "{PUBLISHED}", "releaseDate": "5/13/2023"}}}}"#
        );
        let mut catalog = Catalog::parse(&json).unwrap();
        let err = catalog
            .decode_bundle_urls(&BundleUrlCodec::new())
            .unwrap_err();
        assert!(format!("{err:#}").contains("bundleUrl of product dxp-7.4-u76"));
    }

    #[test]
    fn decode_requires_release_date() {
        let json = format!(r#"{{"dxp-7.4-u76": {{"bundleUrl": "{PUBLISHED}"}}}}"#);
        let mut catalog = Catalog::parse(&json).unwrap();
        let err = catalog
            .decode_bundle_urls(&BundleUrlCodec::new())
            .unwrap_err();
        assert!(err.to_string().contains("has no releaseDate"));
    }

    #[test]
    fn promoted_and_prefix_filters() {
        let catalog = Catalog::parse(&sample()).unwrap();
        let promoted: Vec<&str> = catalog.promoted().into_iter().map(Product::name).collect();
        assert_eq!(promoted, vec!["dxp-7.4-u76"]);
        assert_eq!(catalog.with_name_prefix("portal-").len(), 1);
        assert_eq!(catalog.with_name_prefix("dxp-7.3").len(), 0);
    }

    #[test]
    fn boolean_promoted_flag() {
        let catalog = Catalog::parse(r#"{"a": {"promoted": true}, "b": {}}"#).unwrap();
        assert_eq!(catalog.promoted().len(), 1);
    }
}
