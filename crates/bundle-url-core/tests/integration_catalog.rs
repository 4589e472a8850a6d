//! Integration test: product catalog on disk → decoded, grouped catalogs on disk.

use bundle_url_core::codec::{BundleDecoder, BundleUrlCodec};
use bundle_url_core::config::ProductInfoConfig;
use bundle_url_core::product_info::{write_catalogs, Catalog};
use serde_json::Value;
use std::fs;
use tempfile::tempdir;

const BUNDLE_URL: &str = "BodHRwczovL3JlbGVhc2VzLWNkbi5saWZlcmF5LmNvbS9keHAvNy40LjEzLXU3Ni9saWZlcmF5LWR4cC10b21jYXQtNy40LjEzLnU3Ni0yMDIzMDUwOTE2MDA0NDYwNy50YXIuZ3oAA=";
const EXPECTED_URL: &str = "https://releases-cdn.liferay.com/dxp/7.4.13-u76/liferay-dxp-tomcat-7.4.13.u76-20230509160044607.tar.gz";

#[test]
fn decoded_catalog_round_trips_through_disk() {
    let codec = BundleUrlCodec::new();
    let portal_url = codec
        .encode(
            "https://releases-cdn.liferay.com/portal/7.4.3.80-ga80/liferay-ce-portal-tomcat-7.4.3.80-ga80.tar.gz",
            None,
            &"6/7/2023".into(),
        )
        .unwrap();

    let dir = tempdir().unwrap();
    let input = dir.path().join(".product_info.json");
    fs::write(
        &input,
        format!(
            r#"{{
                "dxp-7.4-u76": {{"bundleUrl": "{BUNDLE_URL}", "promoted": "true", "releaseDate": "05/12/2023"}},
                "portal-7.4-ga80": {{"bundleUrl": "{portal_url}", "promoted": "false", "releaseDate": "6/7/2023"}}
            }}"#
        ),
    )
    .unwrap();

    let mut catalog = Catalog::read(&input).unwrap();
    assert_eq!(catalog.decode_bundle_urls(&codec).unwrap(), 2);

    let out = dir.path().join("out");
    write_catalogs(&catalog, &ProductInfoConfig::default(), &out).unwrap();

    let text = fs::read_to_string(out.join("better_product_info.json")).unwrap();
    let all: Value = serde_json::from_str(&text).unwrap();
    let urls: Vec<&str> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["bundleUrl"].as_str().unwrap())
        .collect();
    assert_eq!(urls[0], EXPECTED_URL);
    assert!(urls[1].ends_with("liferay-ce-portal-tomcat-7.4.3.80-ga80.tar.gz"));

    let portal74 = fs::read_to_string(out.join("portal_74_product_info.json")).unwrap();
    assert!(portal74.contains("\"name\": \"portal-7.4-ga80\""));
}

#[test]
fn decoder_is_usable_as_trait_object() {
    let decoder: Box<dyn BundleDecoder> = Box::new(BundleUrlCodec::new());
    let bundle = decoder
        .decode(&BUNDLE_URL.into(), &"05/12/2023".into())
        .unwrap();
    assert_eq!(bundle.url.as_str(), EXPECTED_URL);
    assert_eq!(
        bundle.url.file_name().as_deref(),
        Some("liferay-dxp-tomcat-7.4.13.u76-20230509160044607.tar.gz")
    );
}
