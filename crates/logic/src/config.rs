//! Configuration and error types for the logic tokenizer.
//!
//! Like every stage config in this workspace, [`TokenizerConfig`] is plain
//! data: serde-friendly, cheap to clone, and validated up front so that
//! tokenizing itself never fails.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::token::LogicToken;

/// How tokens found on the same line are ordered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TokenOrder {
    /// Line, then rule-table priority, then match order within the rule.
    ///
    /// Stored fingerprints were produced this way; switching a deployment to
    /// [`TokenOrder::Lexical`] makes them incomparable with new ones.
    #[default]
    RuleMajor,
    /// Line, then match start offset; rule priority breaks ties.
    Lexical,
}

/// Tokenizer settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenizerConfig {
    /// Configuration schema version. Must be >= 1.
    pub version: u32,
    /// Per-line token ordering.
    #[serde(default)]
    pub order: TokenOrder,
    /// Upper bound on scanned lines.
    ///
    /// Bounds the rules × lines scan on pathological inputs. Lines past the
    /// bound are skipped with a warning. `None` disables the bound.
    #[serde(default = "TokenizerConfig::default_max_lines")]
    pub max_lines: Option<usize>,
}

impl TokenizerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn default_max_lines() -> Option<usize> {
        Some(100_000)
    }

    pub fn with_order(mut self, order: TokenOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_max_lines(mut self, max_lines: Option<usize>) -> Self {
        self.max_lines = max_lines;
        self
    }

    pub fn validate(&self) -> Result<(), TokenizerError> {
        if self.version == 0 {
            return Err(TokenizerError::InvalidConfigVersion {
                version: self.version,
            });
        }
        if self.max_lines == Some(0) {
            return Err(TokenizerError::InvalidMaxLines);
        }
        Ok(())
    }
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            order: TokenOrder::RuleMajor,
            max_lines: Self::default_max_lines(),
        }
    }
}

/// Errors from building a tokenizer. Tokenizing itself is infallible.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TokenizerError {
    #[error("invalid config version {version}; expected >= 1")]
    InvalidConfigVersion { version: u32 },

    #[error("invalid config: max_lines must be >= 1 when set")]
    InvalidMaxLines,

    #[error("invalid pattern for {category}: {source}")]
    InvalidPattern {
        category: LogicToken,
        #[source]
        source: regex::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = TokenizerConfig::default();
        assert_eq!(cfg.version, 1);
        assert_eq!(cfg.order, TokenOrder::RuleMajor);
        assert_eq!(cfg.max_lines, Some(100_000));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn builder_chain() {
        let cfg = TokenizerConfig::new()
            .with_order(TokenOrder::Lexical)
            .with_max_lines(None);
        assert_eq!(cfg.order, TokenOrder::Lexical);
        assert_eq!(cfg.max_lines, None);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn version_zero_rejected() {
        let cfg = TokenizerConfig {
            version: 0,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(TokenizerError::InvalidConfigVersion { version: 0 })
        ));
    }

    #[test]
    fn zero_max_lines_rejected() {
        let cfg = TokenizerConfig::new().with_max_lines(Some(0));
        assert_eq!(cfg.validate(), Err(TokenizerError::InvalidMaxLines));
    }

    #[test]
    fn serde_fills_missing_fields() {
        let cfg: TokenizerConfig = serde_json::from_str(r#"{"version": 1}"#).unwrap();
        assert_eq!(cfg, TokenizerConfig::default());
        let cfg: TokenizerConfig =
            serde_json::from_str(r#"{"version": 2, "order": "lexical", "max_lines": null}"#)
                .unwrap();
        assert_eq!(cfg.order, TokenOrder::Lexical);
        assert_eq!(cfg.max_lines, None);
    }
}
