// [libs/core/hash-kit/src/sha.rs]
//! SHA-256 helpers. `text_sha256_utf32_hex` preserves the historic corpus
//! values, which were produced by hashing the UTF-32 encoding of the body
//! text rather than its UTF-8 bytes.

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of raw bytes.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// SHA-256 over the UTF-32 (native byte order, BOM-prefixed) encoding of
/// `text`, matching CPython's `str.encode('UTF-32')` codec that produced the
/// historic `text_sha256` values in the store.
pub fn text_sha256_utf32_hex(text: &str) -> String {
    let mut buf = Vec::with_capacity(4 + text.chars().count() * 4);
    // CPython's native UTF-32 codec prefixes output with a byte-order mark.
    buf.extend_from_slice(&0xFEFFu32.to_le_bytes());
    for ch in text.chars() {
        buf.extend_from_slice(&(ch as u32).to_le_bytes());
    }
    sha256_hex(&buf)
}
