//! # Logic tokenization and fingerprinting
//!
//! Second stage of the pipeline. Consumes [`NormalizedText`] from the
//! `normalize` crate and produces:
//!
//! 1. a [`TokenSequence`]: coarse control-flow / operator / I/O categories
//!    found by an ordered table of regex rules, and
//! 2. a [`Fingerprint`]: the sequence joined with `|`, used as a stable,
//!    storable identity for a submission's logic shape.
//!
//! ## Contract
//!
//! - Tokens carry only their category, never text or position, so renaming
//!   variables does not change the sequence.
//! - Text is scanned line by line. Within a line, tokens are emitted in
//!   rule-table order, then by match order within each rule
//!   ([`TokenOrder::RuleMajor`]). This is *not* left-to-right source order
//!   and fingerprint equality depends on it.
//! - The API is a pure function of `(text, rule table, config)`. No I/O.
//!
//! ## Example
//!
//! ```
//! use logic::{fingerprint, tokenize_source, LogicToken};
//! use normalize::Language;
//!
//! let tokens = tokenize_source("if (a == b) { x = 1; }", Language::C);
//! assert_eq!(
//!     tokens.as_slice(),
//!     &[LogicToken::If, LogicToken::Compare, LogicToken::Assign]
//! );
//! assert_eq!(fingerprint(&tokens).as_str(), "IF|COMPARE|ASSIGN");
//! ```

pub mod config;
pub mod fingerprint;
pub mod rules;
mod token;
mod tokenizer;

pub use crate::config::{TokenOrder, TokenizerConfig, TokenizerError};
pub use crate::fingerprint::{
    fingerprint, parse_fingerprint, Fingerprint, FingerprintError, FINGERPRINT_DELIMITER,
};
pub use crate::rules::{Rule, RuleTable};
pub use crate::token::{LogicToken, TokenSequence, LOGIC_VOCABULARY_VERSION};
pub use crate::tokenizer::Tokenizer;

use normalize::{normalize, Language, NormalizedText};

/// Tokenize with the shared standard table and default config.
pub fn tokenize(text: &NormalizedText) -> TokenSequence {
    Tokenizer::default().tokenize(text)
}

/// Normalize raw code, then [`tokenize`] it.
pub fn tokenize_source(code: &str, language: Language) -> TokenSequence {
    tokenize(&normalize(code, language))
}
