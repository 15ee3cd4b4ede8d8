//! Identity hashing for normalized text.
//!
//! ```text
//! SHA-256(version.to_be_bytes() || 0x00 || normalized_text_bytes)
//! ```
//!
//! Two submissions with the same hash are byte-identical after comment and
//! whitespace removal, which is a stronger signal than an equal logic
//! fingerprint. The version is mixed in so a change to normalization rules
//! can never collide with hashes stored under the old rules.

use sha2::{Digest, Sha256};

/// Version of the normalization rules, mixed into [`hash_normalized`].
pub const NORMALIZER_VERSION: u32 = 1;

/// Version-aware SHA-256 hex digest of normalized text.
pub fn hash_normalized(version: u32, text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(version.to_be_bytes());
    hasher.update([0u8]);
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}
