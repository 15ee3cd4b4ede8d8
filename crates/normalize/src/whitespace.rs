//! Whitespace normalization.
//!
//! Unlike a prose canonicalizer we keep line structure: the tokenizer scans
//! line by line, so newlines are load-bearing. Only horizontal whitespace is
//! collapsed.
//!
//! ```rust
//! use normalize::collapse_lines;
//!
//! let out = collapse_lines("  if (x)  {\n\n\t\treturn   1;\n  }  ");
//! assert_eq!(out, "if (x) {\nreturn 1;\n}");
//! ```

/// Trim every line, drop the ones left empty, join with `\n`, and collapse
/// runs of spaces and tabs to a single space.
///
/// `\r\n` line endings are handled by [`str::lines`]. The result never has
/// leading or trailing whitespace and is empty for whitespace-only input.
pub fn collapse_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if !out.is_empty() {
            out.push('\n');
        }
        push_collapsed(&mut out, line);
    }
    out
}

/// Append `line` to `out`, folding space/tab runs into one space.
fn push_collapsed(out: &mut String, line: &str) {
    let mut in_run = false;
    for ch in line.chars() {
        if ch == ' ' || ch == '\t' {
            if !in_run {
                out.push(' ');
                in_run = true;
            }
        } else {
            out.push(ch);
            in_run = false;
        }
    }
}
