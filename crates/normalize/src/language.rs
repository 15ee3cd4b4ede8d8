//! Source language tags.
//!
//! The surrounding submission service hands us a free-form `language`
//! string. We map it onto a closed set once, up front, so the rest of the
//! pipeline can match on an enum instead of comparing strings.
//!
//! Mapping is total: an empty tag means [`Language::Unspecified`] and an
//! unrecognized tag means [`Language::Other`]. Rejecting unsupported tags
//! is the caller's job, not ours.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Language family of a submission.
///
/// Serialized as its lowercase tag; deserialized through
/// [`Language::from_tag`], so unknown tags never fail to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    Python,
    Java,
    C,
    Cpp,
    Sql,
    /// The operating-systems lab C variant.
    Os,
    /// No language tag supplied.
    #[default]
    Unspecified,
    /// A tag we do not recognize.
    Other,
}

impl Language {
    /// Map a caller-supplied tag onto a [`Language`]. Case-insensitive.
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim();
        if tag.is_empty() {
            return Language::Unspecified;
        }
        match tag.to_ascii_lowercase().as_str() {
            "python" | "py" => Language::Python,
            "java" => Language::Java,
            "c" => Language::C,
            "cpp" | "c++" | "cxx" => Language::Cpp,
            "sql" => Language::Sql,
            "os" => Language::Os,
            "unspecified" => Language::Unspecified,
            _ => Language::Other,
        }
    }

    /// Same as [`Language::from_tag`] but treats a missing tag as unspecified.
    pub fn from_optional_tag(tag: Option<&str>) -> Self {
        tag.map(Self::from_tag).unwrap_or(Language::Unspecified)
    }

    /// Whether `#` line comments and triple-quoted docstrings are stripped.
    ///
    /// Only Python and the unspecified case get this treatment; for every
    /// other family `#` is meaningful (preprocessor lines, SQL operators).
    pub fn strips_hash_comments(self) -> bool {
        matches!(self, Language::Python | Language::Unspecified)
    }

    /// Canonical lowercase tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Java => "java",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::Sql => "sql",
            Language::Os => "os",
            Language::Unspecified => "unspecified",
            Language::Other => "other",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = Option::<String>::deserialize(deserializer)?;
        Ok(Language::from_optional_tag(tag.as_deref()))
    }
}
