//! Canonical string identity for a token sequence.
//!
//! A fingerprint is the category names joined with `|`. Category names never
//! contain the delimiter, so the join is unambiguous and
//! [`parse_fingerprint`] recovers the exact sequence.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use xxhash_rust::xxh3::xxh3_64_with_seed;

use crate::token::{LogicToken, TokenSequence, LOGIC_VOCABULARY_VERSION};

/// Separator between category names.
pub const FINGERPRINT_DELIMITER: char = '|';

/// Stored form of a submission's logic shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 64-bit xxh3 digest, seeded with the vocabulary version.
    ///
    /// Handy as a compact index key. Equal fingerprints always share a
    /// digest; the converse only holds up to hash collisions.
    pub fn digest(&self) -> u64 {
        xxh3_64_with_seed(self.0.as_bytes(), u64::from(LOGIC_VOCABULARY_VERSION))
    }

    /// Recover the token sequence.
    pub fn tokens(&self) -> Result<TokenSequence, FingerprintError> {
        parse_fingerprint(&self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Fingerprint {
    type Err = FingerprintError;

    /// Parse a stored fingerprint, rejecting unknown categories.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = parse_fingerprint(s)?;
        Ok(fingerprint(&tokens))
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Errors from reading back a stored fingerprint.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FingerprintError {
    #[error("unknown logic category '{0}'")]
    UnknownCategory(String),
}

/// Join token category names with `|`. An empty sequence gives `""`.
pub fn fingerprint(tokens: &[LogicToken]) -> Fingerprint {
    let mut out = String::with_capacity(tokens.len() * 6);
    for (i, token) in tokens.iter().enumerate() {
        if i > 0 {
            out.push(FINGERPRINT_DELIMITER);
        }
        out.push_str(token.as_str());
    }
    Fingerprint(out)
}

/// Inverse of [`fingerprint`].
pub fn parse_fingerprint(s: &str) -> Result<TokenSequence, FingerprintError> {
    if s.is_empty() {
        return Ok(TokenSequence::default());
    }
    s.split(FINGERPRINT_DELIMITER)
        .map(str::parse::<LogicToken>)
        .collect()
}
