//! Line-oriented pattern tokenizer.

use std::sync::Arc;

use normalize::NormalizedText;
use tracing::warn;

use crate::config::{TokenOrder, TokenizerConfig, TokenizerError};
use crate::rules::RuleTable;
use crate::token::{LogicToken, TokenSequence};

/// Turns normalized text into a [`TokenSequence`] using a [`RuleTable`].
///
/// Cheap to clone; the rule table is shared.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    table: Arc<RuleTable>,
    cfg: TokenizerConfig,
}

impl Tokenizer {
    /// Tokenizer over the shared standard table.
    pub fn new(cfg: TokenizerConfig) -> Result<Self, TokenizerError> {
        Self::with_table(RuleTable::shared(), cfg)
    }

    pub fn with_table(table: Arc<RuleTable>, cfg: TokenizerConfig) -> Result<Self, TokenizerError> {
        cfg.validate()?;
        Ok(Self { table, cfg })
    }

    pub fn config(&self) -> &TokenizerConfig {
        &self.cfg
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    /// Tokenize line by line. Never fails; unmatched lines add nothing.
    pub fn tokenize(&self, text: &NormalizedText) -> TokenSequence {
        let mut out = Vec::new();
        let mut scratch: Vec<(usize, usize, LogicToken)> = Vec::new();

        for (line_no, line) in text.lines().enumerate() {
            if let Some(max_lines) = self.cfg.max_lines {
                if line_no >= max_lines {
                    warn!(
                        max_lines,
                        total_lines = text.lines().count(),
                        tokens = out.len(),
                        "tokenize_truncated"
                    );
                    break;
                }
            }

            match self.cfg.order {
                TokenOrder::RuleMajor => self.scan_rule_major(line, &mut out),
                TokenOrder::Lexical => self.scan_lexical(line, &mut scratch, &mut out),
            }
        }

        TokenSequence::new(out)
    }

    /// Every match of rule 0, then every match of rule 1, and so on.
    fn scan_rule_major(&self, line: &str, out: &mut Vec<LogicToken>) {
        for rule in self.table.rules() {
            let category = rule.category();
            out.extend(rule.matches(line).map(|_| category));
        }
    }

    /// Matches sorted by start offset, rule priority breaking ties.
    fn scan_lexical(
        &self,
        line: &str,
        scratch: &mut Vec<(usize, usize, LogicToken)>,
        out: &mut Vec<LogicToken>,
    ) {
        scratch.clear();
        for (priority, rule) in self.table.rules().iter().enumerate() {
            let category = rule.category();
            scratch.extend(rule.matches(line).map(|m| (m.start(), priority, category)));
        }
        scratch.sort_unstable_by_key(|&(start, priority, _)| (start, priority));
        out.extend(scratch.iter().map(|&(_, _, category)| category));
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self {
            table: RuleTable::shared(),
            cfg: TokenizerConfig::default(),
        }
    }
}
