//! Codec error type.

/// Reasons the codec rejects an encoded reference, a key, or an encode input.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("encoded bundle reference is empty")]
    EmptyInput,

    #[error("decode key is empty")]
    EmptyKey,

    #[error("bundle reference is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("invalid decode key {key:?}: expected a release date (MM/DD/YYYY or YYYY-MM-DD)")]
    InvalidKey { key: String },

    #[error("bundle reference is too short ({len} bytes)")]
    Truncated { len: usize },

    /// Payload lacks its NUL separators. Usually means the key is wrong.
    #[error("bundle reference is not terminated (wrong key?)")]
    MissingTerminator,

    #[error("decoded URL is not valid UTF-8 (wrong key?)")]
    InvalidUtf8,

    #[error("not a valid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("URL contains a NUL byte")]
    EmbeddedNul,

    #[error("URL scheme {scheme:?} is not allowed")]
    DisallowedScheme { scheme: String },

    #[error("metadata must be printable ASCII")]
    InvalidMetadata,
}
