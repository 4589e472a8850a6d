//! Decode key parsing: keys are release dates.

use chrono::{Datelike, NaiveDate};

use super::CodecError;
use crate::bundle::DecodeKey;

/// Accepted key layouts: catalog style (`5/12/2023`, `05/12/2023`) and ISO
/// style as found in `release.properties`.
const KEY_FORMATS: [&str; 2] = ["%m/%d/%Y", "%Y-%m-%d"];

/// Parses the release date carried by `key`.
pub fn release_date(key: &DecodeKey) -> Result<NaiveDate, CodecError> {
    let trimmed = key.as_str().trim();
    if trimmed.is_empty() {
        return Err(CodecError::EmptyKey);
    }
    KEY_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| CodecError::InvalidKey {
            key: trimmed.to_string(),
        })
}

/// Bit rotation applied to the payload for this key.
pub(crate) fn rotation(key: &DecodeKey) -> Result<u32, CodecError> {
    Ok(release_date(key)?.day() % 8)
}
