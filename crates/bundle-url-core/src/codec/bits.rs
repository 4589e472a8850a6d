//! Whole-buffer bit rotation.
//!
//! The buffer is treated as one big-endian bit string; bits shifted off one
//! end re-enter at the other. Rotation amounts are below one byte.

pub(crate) fn rotate_left(bytes: &[u8], bits: u32) -> Vec<u8> {
    debug_assert!(bits < 8);
    let n = bytes.len();
    if bits == 0 || n == 0 {
        return bytes.to_vec();
    }
    (0..n)
        .map(|i| (bytes[i] << bits) | (bytes[(i + 1) % n] >> (8 - bits)))
        .collect()
}

pub(crate) fn rotate_right(bytes: &[u8], bits: u32) -> Vec<u8> {
    debug_assert!(bits < 8);
    let n = bytes.len();
    if bits == 0 || n == 0 {
        return bytes.to_vec();
    }
    (0..n)
        .map(|i| (bytes[i] >> bits) | (bytes[(i + n - 1) % n] << (8 - bits)))
        .collect()
}
