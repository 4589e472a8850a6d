//! Bundle URL codec.
//!
//! Reference layout: `url NUL metadata NUL`, rotated right as a whole by
//! `day_of_month(key) % 8` bits, then standard padded base64. Decoding
//! reverses this and validates the result as an absolute URL with an
//! allowed scheme.
//!
//! Callers depend on [`BundleDecoder`] rather than the concrete codec.

mod bits;
mod error;
mod key;

pub use error::CodecError;
pub use key::release_date;

use base64::{engine::general_purpose, Engine as _};
use url::Url;

use crate::bundle::{DecodeKey, DecodedBundle, DecodedUrl, EncodedBundleReference};

/// Schemes accepted when no explicit list is configured.
pub const DEFAULT_ALLOWED_SCHEMES: [&str; 2] = ["https", "http"];

const SEPARATOR: u8 = 0;

/// Decode capability: one encoded reference plus one key gives one URL.
pub trait BundleDecoder {
    fn decode(
        &self,
        encoded: &EncodedBundleReference,
        key: &DecodeKey,
    ) -> Result<DecodedBundle, CodecError>;
}

/// The bundle URL codec.
#[derive(Debug, Clone)]
pub struct BundleUrlCodec {
    allowed_schemes: Vec<String>,
}

impl Default for BundleUrlCodec {
    fn default() -> Self {
        Self::with_allowed_schemes(DEFAULT_ALLOWED_SCHEMES)
    }
}

impl BundleUrlCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Codec accepting only the given URL schemes (compared case-insensitively).
    pub fn with_allowed_schemes<I, S>(schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_schemes: schemes
                .into_iter()
                .map(|s| s.into().to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn allowed_schemes(&self) -> &[String] {
        &self.allowed_schemes
    }

    /// Encodes `url` (and optional `metadata`) under `key`.
    pub fn encode(
        &self,
        url: &str,
        metadata: Option<&str>,
        key: &DecodeKey,
    ) -> Result<EncodedBundleReference, CodecError> {
        let rotation = key::rotation(key)?;
        if url.as_bytes().contains(&SEPARATOR) {
            return Err(CodecError::EmbeddedNul);
        }
        self.validate_url(url)?;
        let metadata = metadata.unwrap_or_default();
        if !is_printable_ascii(metadata) {
            return Err(CodecError::InvalidMetadata);
        }

        let mut payload = Vec::with_capacity(url.len() + metadata.len() + 2);
        payload.extend_from_slice(url.as_bytes());
        payload.push(SEPARATOR);
        payload.extend_from_slice(metadata.as_bytes());
        payload.push(SEPARATOR);

        let rotated = bits::rotate_right(&payload, rotation);
        Ok(EncodedBundleReference::new(
            general_purpose::STANDARD.encode(rotated),
        ))
    }

    fn validate_url(&self, raw: &str) -> Result<Url, CodecError> {
        let parsed = Url::parse(raw)?;
        let scheme = parsed.scheme();
        if !self
            .allowed_schemes
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(scheme))
        {
            return Err(CodecError::DisallowedScheme {
                scheme: scheme.to_string(),
            });
        }
        Ok(parsed)
    }
}

impl BundleDecoder for BundleUrlCodec {
    fn decode(
        &self,
        encoded: &EncodedBundleReference,
        key: &DecodeKey,
    ) -> Result<DecodedBundle, CodecError> {
        let input = encoded.as_str().trim();
        if input.is_empty() {
            return Err(CodecError::EmptyInput);
        }
        let rotation = key::rotation(key)?;
        let rotated = general_purpose::STANDARD.decode(input)?;
        tracing::debug!(len = rotated.len(), rotation, "decoding bundle reference");
        if rotated.len() < 2 {
            return Err(CodecError::Truncated { len: rotated.len() });
        }

        let payload = bits::rotate_left(&rotated, rotation);
        let (url_bytes, metadata_bytes) = split_payload(&payload)?;

        let raw = String::from_utf8(url_bytes.to_vec()).map_err(|_| CodecError::InvalidUtf8)?;
        let parsed = self.validate_url(&raw)?;

        let metadata = std::str::from_utf8(metadata_bytes)
            .ok()
            .filter(|m| is_printable_ascii(m))
            .ok_or(CodecError::InvalidMetadata)?;

        Ok(DecodedBundle {
            url: DecodedUrl::new(raw, parsed),
            metadata: (!metadata.is_empty()).then(|| metadata.to_string()),
        })
    }
}

/// Splits `url NUL metadata NUL` into its two fields.
fn split_payload(payload: &[u8]) -> Result<(&[u8], &[u8]), CodecError> {
    let body = match payload.split_last() {
        Some((&SEPARATOR, body)) => body,
        _ => return Err(CodecError::MissingTerminator),
    };
    let sep = body
        .iter()
        .position(|&b| b == SEPARATOR)
        .ok_or(CodecError::MissingTerminator)?;
    Ok((&body[..sep], &body[sep + 1..]))
}

fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..0x7f).contains(&b))
}
