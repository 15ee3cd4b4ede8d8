//! Comment stripping.
//!
//! C-style comments are removed for every language, including ones that do
//! not use them. Python-style `#` comments and triple-quoted docstrings are
//! only removed when [`Language::strips_hash_comments`] says so.
//!
//! Stripping is purely lexical. A `//` inside a string literal is treated as
//! a comment start, and an unterminated `/*` or `"""` is left untouched.

use std::sync::OnceLock;

use regex::Regex;

use crate::language::Language;

struct CommentPatterns {
    block: Regex,
    line: Regex,
    triple_quoted: Regex,
    hash_line: Regex,
}

fn patterns() -> &'static CommentPatterns {
    static PATTERNS: OnceLock<CommentPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| CommentPatterns {
        block: Regex::new(r"(?s)/\*.*?\*/").expect("block comment pattern"),
        line: Regex::new(r"//[^\n]*").expect("line comment pattern"),
        triple_quoted: Regex::new(r#"(?s)'''.*?'''|""".*?""""#).expect("docstring pattern"),
        hash_line: Regex::new(r"#[^\n]*").expect("hash comment pattern"),
    })
}

/// Remove comment content from `code` according to `language`.
///
/// Order matters: docstrings go first so a `#` or `//` inside one cannot cut
/// it in half, and `#` lines go last so a `#` inside a C block comment is
/// already gone.
pub fn strip_comments(code: &str, language: Language) -> String {
    let p = patterns();
    let hash_style = language.strips_hash_comments();

    let mut text = if hash_style {
        p.triple_quoted.replace_all(code, "").into_owned()
    } else {
        code.to_owned()
    };
    text = p.block.replace_all(&text, "").into_owned();
    text = p.line.replace_all(&text, "").into_owned();
    if hash_style {
        text = p.hash_line.replace_all(&text, "").into_owned();
    }
    text
}
