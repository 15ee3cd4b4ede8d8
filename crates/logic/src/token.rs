//! The logic token vocabulary.
//!
//! A [`LogicToken`] is a bare category label. It carries no text and no
//! source position, which is what makes token sequences immune to
//! identifier renaming.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::fingerprint::FingerprintError;

/// Version of the category vocabulary.
///
/// Stored fingerprints are only comparable when produced under the same
/// vocabulary. Adding, removing or renaming a category must bump this.
pub const LOGIC_VOCABULARY_VERSION: u16 = 1;

/// One coarse control-flow, structure, operator or I/O category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogicToken {
    If,
    Else,
    For,
    While,
    Do,
    Switch,
    Case,
    Break,
    Continue,
    Return,
    Try,
    Catch,
    FuncDef,
    Class,
    Main,
    Assign,
    Compare,
    Math,
    Logic,
    Print,
}

impl LogicToken {
    /// Number of categories in the vocabulary.
    pub const COUNT: usize = 20;

    /// Every category, in declaration order.
    pub const ALL: [LogicToken; Self::COUNT] = [
        LogicToken::If,
        LogicToken::Else,
        LogicToken::For,
        LogicToken::While,
        LogicToken::Do,
        LogicToken::Switch,
        LogicToken::Case,
        LogicToken::Break,
        LogicToken::Continue,
        LogicToken::Return,
        LogicToken::Try,
        LogicToken::Catch,
        LogicToken::FuncDef,
        LogicToken::Class,
        LogicToken::Main,
        LogicToken::Assign,
        LogicToken::Compare,
        LogicToken::Math,
        LogicToken::Logic,
        LogicToken::Print,
    ];

    /// Wire name of the category. Never contains `|`.
    pub const fn as_str(self) -> &'static str {
        match self {
            LogicToken::If => "IF",
            LogicToken::Else => "ELSE",
            LogicToken::For => "FOR",
            LogicToken::While => "WHILE",
            LogicToken::Do => "DO",
            LogicToken::Switch => "SWITCH",
            LogicToken::Case => "CASE",
            LogicToken::Break => "BREAK",
            LogicToken::Continue => "CONTINUE",
            LogicToken::Return => "RETURN",
            LogicToken::Try => "TRY",
            LogicToken::Catch => "CATCH",
            LogicToken::FuncDef => "FUNC_DEF",
            LogicToken::Class => "CLASS",
            LogicToken::Main => "MAIN",
            LogicToken::Assign => "ASSIGN",
            LogicToken::Compare => "COMPARE",
            LogicToken::Math => "MATH",
            LogicToken::Logic => "LOGIC",
            LogicToken::Print => "PRINT",
        }
    }

    /// Dense index in `0..COUNT`, for array-backed frequency tables.
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for LogicToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogicToken {
    type Err = FingerprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogicToken::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| FingerprintError::UnknownCategory(s.to_string()))
    }
}

/// Ordered sequence of logic tokens for one submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct TokenSequence(Vec<LogicToken>);

impl TokenSequence {
    pub fn new(tokens: Vec<LogicToken>) -> Self {
        Self(tokens)
    }

    pub fn as_slice(&self) -> &[LogicToken] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<LogicToken> {
        self.0
    }
}

impl Deref for TokenSequence {
    type Target = [LogicToken];

    fn deref(&self) -> &[LogicToken] {
        &self.0
    }
}

impl AsRef<[LogicToken]> for TokenSequence {
    fn as_ref(&self) -> &[LogicToken] {
        &self.0
    }
}

impl From<Vec<LogicToken>> for TokenSequence {
    fn from(tokens: Vec<LogicToken>) -> Self {
        Self(tokens)
    }
}

impl FromIterator<LogicToken> for TokenSequence {
    fn from_iter<I: IntoIterator<Item = LogicToken>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TokenSequence {
    type Item = &'a LogicToken;
    type IntoIter = std::slice::Iter<'a, LogicToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for TokenSequence {
    type Item = LogicToken;
    type IntoIter = std::vec::IntoIter<LogicToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_indexed_in_order() {
        for (i, token) in LogicToken::ALL.iter().enumerate() {
            assert_eq!(token.index(), i);
        }
    }

    #[test]
    fn names_are_unique_and_pipe_free() {
        let mut names: Vec<&str> = LogicToken::ALL.iter().map(|t| t.as_str()).collect();
        assert!(names.iter().all(|n| !n.contains('|')));
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), LogicToken::COUNT);
    }

    #[test]
    fn from_str_inverts_as_str() {
        for token in LogicToken::ALL {
            assert_eq!(token.as_str().parse::<LogicToken>().unwrap(), token);
        }
        assert!("LOOP".parse::<LogicToken>().is_err());
    }

    #[test]
    fn serde_matches_wire_names() {
        for token in LogicToken::ALL {
            let json = serde_json::to_string(&token).unwrap();
            assert_eq!(json, format!("\"{}\"", token.as_str()));
        }
        let seq: TokenSequence = serde_json::from_str(r#"["FUNC_DEF","PRINT"]"#).unwrap();
        assert_eq!(seq.as_slice(), &[LogicToken::FuncDef, LogicToken::Print]);
    }
}
