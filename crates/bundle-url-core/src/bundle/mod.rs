//! Bundle reference data model.
//!
//! An encoded reference and its key go in, a validated download URL (plus the
//! optional metadata carried alongside it) comes out.

mod path;

pub use path::file_name_from_url;

use serde::{Serialize, Serializer};
use std::fmt;
use url::Url;

/// Encoded form of a bundle URL plus embedded metadata, as published in
/// product catalogs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EncodedBundleReference(String);

impl EncodedBundleReference {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EncodedBundleReference {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for EncodedBundleReference {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for EncodedBundleReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Secondary parameter needed to reverse the encoding (a release date).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DecodeKey(String);

impl DecodeKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DecodeKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for DecodeKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for DecodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Plain download URL produced by decoding.
///
/// Keeps the decoded text verbatim (no URL normalization) next to the parsed
/// form, so printing it reproduces exactly what was encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedUrl {
    raw: String,
    parsed: Url,
}

impl DecodedUrl {
    pub(crate) fn new(raw: String, parsed: Url) -> Self {
        Self { raw, parsed }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn url(&self) -> &Url {
        &self.parsed
    }

    pub fn scheme(&self) -> &str {
        self.parsed.scheme()
    }

    /// Last path segment, e.g. the archive name of a bundle URL.
    pub fn file_name(&self) -> Option<String> {
        file_name_from_url(&self.parsed)
    }

    pub fn into_string(self) -> String {
        self.raw
    }
}

impl fmt::Display for DecodedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for DecodedUrl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

/// Result of one decode call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedBundle {
    pub url: DecodedUrl,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
}
