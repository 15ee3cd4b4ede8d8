use std::fmt;

use serde::Serialize;

use crate::hash::{hash_normalized, NORMALIZER_VERSION};

/// Source text with comments removed and whitespace canonicalized.
///
/// Only [`normalize`](crate::normalize) produces these, so holding one means
/// the text has no blank lines, no leading/trailing whitespace on any line
/// and no space/tab runs.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub(crate) fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate the (already trimmed, non-empty) lines.
    pub fn lines(&self) -> std::str::Lines<'_> {
        self.0.lines()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Identity hash under the current [`NORMALIZER_VERSION`].
    pub fn sha256_hex(&self) -> String {
        hash_normalized(NORMALIZER_VERSION, &self.0)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
