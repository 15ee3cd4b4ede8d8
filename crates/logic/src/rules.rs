//! The ordered category → pattern table.
//!
//! Table order is tokenizer priority: under [`TokenOrder::RuleMajor`]
//! every match of an earlier rule on a line is emitted before any match of
//! a later rule on that line. Reordering rules therefore changes
//! fingerprints and requires a vocabulary version bump.
//!
//! [`TokenOrder::RuleMajor`]: crate::TokenOrder::RuleMajor

use std::sync::{Arc, OnceLock};

use regex::{Match, Regex};

use crate::config::TokenizerError;
use crate::token::LogicToken;

/// One category and the pattern that recognizes it.
#[derive(Debug, Clone)]
pub struct Rule {
    category: LogicToken,
    pattern: Regex,
    /// A match immediately followed by this character is discarded. Stands
    /// in for the negative lookahead the regex engine does not support.
    reject_next: Option<char>,
}

impl Rule {
    pub fn new(category: LogicToken, pattern: &str) -> Result<Self, TokenizerError> {
        let pattern = Regex::new(pattern)
            .map_err(|source| TokenizerError::InvalidPattern { category, source })?;
        Ok(Self {
            category,
            pattern,
            reject_next: None,
        })
    }

    /// Discard matches that are directly followed by `ch`.
    pub fn rejecting_next(mut self, ch: char) -> Self {
        self.reject_next = Some(ch);
        self
    }

    pub fn category(&self) -> LogicToken {
        self.category
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Non-overlapping matches on `line`, left to right.
    pub fn matches<'l>(&'l self, line: &'l str) -> impl Iterator<Item = Match<'l>> + 'l {
        self.pattern.find_iter(line).filter(move |m| match self.reject_next {
            Some(ch) => !line[m.end()..].starts_with(ch),
            None => true,
        })
    }
}

/// Immutable, ordered list of [`Rule`]s.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    pub fn from_rules(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The built-in table for vocabulary version 1.
    pub fn standard() -> Self {
        let rule = |category: LogicToken, pattern: &str| {
            Rule::new(category, pattern).expect("built-in logic pattern compiles")
        };

        Self::from_rules(vec![
            rule(
                LogicToken::FuncDef,
                r"\bdef\s+\w+\s*\(|\bfunction\s+\w+\s*\(|\b(?:public|private|protected|static)\s+(?:[\w<>\[\],]+\s+)*?\w+\s*\(|\b(?:void|int|float|double|char|long|short|bool|boolean|String|auto)\b[\s*]+\w+\s*\(",
            ),
            rule(LogicToken::Class, r"\bclass\s+\w+"),
            rule(
                LogicToken::Main,
                r#"\bmain\s*\(|__name__\s*==\s*['"]__main__['"]"#,
            ),
            // `if (`, plus a Python `if`/`elif` heading a trimmed line.
            rule(LogicToken::If, r"\bif\s*\(|^(?:el)?if\b"),
            rule(LogicToken::Else, r"\belse\b"),
            rule(LogicToken::For, r"\bfor\b"),
            rule(LogicToken::While, r"\bwhile\b"),
            rule(LogicToken::Do, r"\bdo\s*(?:\{|$)"),
            rule(LogicToken::Switch, r"\bswitch\b"),
            rule(LogicToken::Case, r"\bcase\b"),
            rule(LogicToken::Break, r"\bbreak\b"),
            rule(LogicToken::Continue, r"\bcontinue\b"),
            rule(LogicToken::Return, r"\breturn\b"),
            rule(LogicToken::Try, r"\btry\b"),
            rule(LogicToken::Catch, r"\b(?:catch|except)\b"),
            rule(LogicToken::Compare, r"==|!=|<=|>=|<|>"),
            rule(LogicToken::Assign, r"\b[A-Za-z_]\w*\s*=").rejecting_next('='),
            rule(LogicToken::Math, r"\+\+|--|[+\-*/%]=?"),
            rule(LogicToken::Logic, r"&&|\|\||\b(?:and|or|not)\b"),
            rule(
                LogicToken::Print,
                r"\b(?:System\.out\.print(?:ln|f)?|console\.log|fmt\.Print\w*|printf|println|print|puts|cout|echo)\b",
            ),
        ])
    }

    /// Process-wide instance of [`RuleTable::standard`], built on first use.
    pub fn shared() -> Arc<RuleTable> {
        static SHARED: OnceLock<Arc<RuleTable>> = OnceLock::new();
        Arc::clone(SHARED.get_or_init(|| Arc::new(RuleTable::standard())))
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories_on(line: &str) -> Vec<LogicToken> {
        let table = RuleTable::standard();
        table
            .rules()
            .iter()
            .filter(|r| r.matches(line).next().is_some())
            .map(Rule::category)
            .collect()
    }

    fn count(category: LogicToken, line: &str) -> usize {
        let table = RuleTable::standard();
        let rule = table
            .rules()
            .iter()
            .find(|r| r.category() == category)
            .unwrap();
        rule.matches(line).count()
    }

    #[test]
    fn standard_table_covers_vocabulary_once() {
        let table = RuleTable::standard();
        assert_eq!(table.len(), LogicToken::COUNT);
        let mut cats: Vec<LogicToken> = table.rules().iter().map(Rule::category).collect();
        cats.sort();
        cats.dedup();
        assert_eq!(cats.len(), LogicToken::COUNT);
    }

    #[test]
    fn shared_table_is_reused() {
        let a = RuleTable::shared();
        let b = RuleTable::shared();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn assign_skips_equality() {
        assert_eq!(count(LogicToken::Assign, "x = 1;"), 1);
        assert_eq!(count(LogicToken::Assign, "if (a == b)"), 0);
        assert_eq!(count(LogicToken::Assign, "if(a==b)"), 0);
        assert_eq!(count(LogicToken::Assign, "a <= b"), 0);
        assert_eq!(count(LogicToken::Assign, "a != b"), 0);
        assert_eq!(count(LogicToken::Assign, "x =y"), 1);
    }

    #[test]
    fn compare_counts_each_operator() {
        assert_eq!(count(LogicToken::Compare, "a == b && c != d"), 2);
        assert_eq!(count(LogicToken::Compare, "i <= n"), 1);
        assert_eq!(count(LogicToken::Compare, "x < y > z"), 2);
    }

    #[test]
    fn math_operators() {
        assert_eq!(count(LogicToken::Math, "i++"), 1);
        assert_eq!(count(LogicToken::Math, "total += a * b - c / d % e"), 5);
    }

    #[test]
    fn function_definitions_across_languages() {
        assert_eq!(count(LogicToken::FuncDef, "def solve(n):"), 1);
        assert_eq!(count(LogicToken::FuncDef, "function solve(n) {"), 1);
        assert_eq!(count(LogicToken::FuncDef, "int solve(int n) {"), 1);
        assert_eq!(count(LogicToken::FuncDef, "char *dup(const char *s) {"), 1);
        assert_eq!(
            count(LogicToken::FuncDef, "public static void main(String[] args) {"),
            1
        );
        assert_eq!(count(LogicToken::FuncDef, "int x = compute(y);"), 0);
        assert_eq!(count(LogicToken::FuncDef, "return solve(n - 1);"), 0);
    }

    #[test]
    fn main_entry_points() {
        assert_eq!(count(LogicToken::Main, "int main() {"), 1);
        assert_eq!(count(LogicToken::Main, "if __name__ == \"__main__\":"), 1);
        assert_eq!(count(LogicToken::Main, "if __name__ == '__main__':"), 1);
    }

    #[test]
    fn keywords_need_word_boundaries() {
        assert_eq!(count(LogicToken::If, "#ifdef DEBUG"), 0);
        assert_eq!(count(LogicToken::For, "format(x)"), 0);
        assert_eq!(count(LogicToken::Return, "returned = 1"), 0);
        assert_eq!(count(LogicToken::Catch, "except ValueError:"), 1);
    }

    #[test]
    fn if_needs_paren_or_line_head() {
        assert_eq!(count(LogicToken::If, "if (x > 0) {"), 1);
        assert_eq!(count(LogicToken::If, "} else if(y) {"), 1);
        assert_eq!(count(LogicToken::If, "if x > 0:"), 1);
        assert_eq!(count(LogicToken::If, "elif x:"), 1);
        assert_eq!(count(LogicToken::If, "print(\"if only\")"), 0);
        assert_eq!(count(LogicToken::If, "y = a if b else c"), 0);
        assert_eq!(count(LogicToken::If, "notify(x)"), 0);
    }

    #[test]
    fn do_only_as_loop_head() {
        assert_eq!(count(LogicToken::Do, "do {"), 1);
        assert_eq!(count(LogicToken::Do, "do"), 1);
        assert_eq!(count(LogicToken::Do, "print(\"what to do next\")"), 0);
    }

    #[test]
    fn print_calls_across_languages() {
        assert_eq!(count(LogicToken::Print, "print(x)"), 1);
        assert_eq!(count(LogicToken::Print, "printf(\"%d\", x);"), 1);
        assert_eq!(count(LogicToken::Print, "System.out.println(x);"), 1);
        assert_eq!(count(LogicToken::Print, "cout << x << endl;"), 1);
        assert_eq!(count(LogicToken::Print, "console.log(x)"), 1);
        assert_eq!(count(LogicToken::Print, "sprint(x)"), 0);
    }

    #[test]
    fn logic_operators() {
        assert_eq!(count(LogicToken::Logic, "a && b || c"), 2);
        assert_eq!(count(LogicToken::Logic, "if a and not b:"), 2);
        assert_eq!(count(LogicToken::Logic, "order = 1"), 0);
    }

    #[test]
    fn categories_on_simple_if_line() {
        assert_eq!(
            categories_on("if (a == b) { x = 1; }"),
            vec![LogicToken::If, LogicToken::Compare, LogicToken::Assign]
        );
    }

    #[test]
    fn invalid_custom_pattern_reports_category() {
        let err = Rule::new(LogicToken::Print, "(unclosed").unwrap_err();
        assert!(matches!(
            err,
            TokenizerError::InvalidPattern {
                category: LogicToken::Print,
                ..
            }
        ));
    }
}
