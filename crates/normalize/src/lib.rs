//! Source normalization layer.
//!
//! First stage of the logic-fingerprint pipeline. Takes a raw submission and
//! its language tag and returns text with all comment content removed and
//! whitespace canonicalized, so that reformatting or re-commenting a copied
//! solution changes nothing downstream.
//!
//! ## What we do
//!
//! - Strip `/* … */` and `// …` comments for every language
//! - Strip `# …` comments and `'''…'''` / `"""…"""` docstrings for Python
//!   and for submissions without a language tag
//! - Trim lines, drop blank ones, collapse space/tab runs
//!
//! ## Pure function guarantee
//!
//! No I/O, no clocks, no locale. [`normalize`] is total: empty input gives an
//! empty [`NormalizedText`] and malformed code is processed like any other.
//!
//! ## Example
//!
//! ```
//! use normalize::{normalize, Language};
//!
//! let code = "def add(a, b):\n    # sum two values\n    return a + b\n";
//! let text = normalize(code, Language::Python);
//! assert_eq!(text.as_str(), "def add(a, b):\nreturn a + b");
//! ```

mod comments;
mod hash;
mod language;
mod text;
mod whitespace;

pub use crate::comments::strip_comments;
pub use crate::hash::{hash_normalized, NORMALIZER_VERSION};
pub use crate::language::Language;
pub use crate::text::NormalizedText;
pub use crate::whitespace::collapse_lines;

/// Strip comments and canonicalize whitespace.
pub fn normalize(code: &str, language: Language) -> NormalizedText {
    if code.is_empty() {
        return NormalizedText::default();
    }
    let stripped = strip_comments(code, language);
    NormalizedText::new(collapse_lines(&stripped))
}

/// [`normalize`] for callers holding a raw, possibly missing, language tag.
pub fn normalize_tagged(code: Option<&str>, language: Option<&str>) -> NormalizedText {
    normalize(
        code.unwrap_or_default(),
        Language::from_optional_tag(language),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_empty_text() {
        assert!(normalize("", Language::C).is_empty());
        assert!(normalize_tagged(None, None).is_empty());
        assert!(normalize("   \n\n\t", Language::Java).is_empty());
    }

    #[test]
    fn comment_only_input_is_empty_text() {
        assert!(normalize("/* nothing */\n// at all\n", Language::C).is_empty());
        assert!(normalize("# just a note\n'''doc'''", Language::Python).is_empty());
    }

    #[test]
    fn java_submission() {
        let code = r#"
            public class Main {
                /** Entry point. */
                public static void main(String[] args) {
                    int   total = 0;   // running sum
                    System.out.println(total);
                }
            }
        "#;
        let text = normalize(code, Language::Java);
        assert_eq!(
            text.as_str(),
            "public class Main {\npublic static void main(String[] args) {\nint total = 0;\nSystem.out.println(total);\n}\n}"
        );
    }

    #[test]
    fn reformatting_does_not_change_output() {
        let a = "int main() {\n  int x = 1;\n  return x;\n}\n";
        let b = "int main() {\n\n\n\tint    x = 1; /* init */\n\treturn x;   // done\n}";
        assert_eq!(normalize(a, Language::C), normalize(b, Language::C));
    }

    #[test]
    fn untagged_code_gets_python_stripping() {
        let text = normalize_tagged(Some("x = 1  # one"), None);
        assert_eq!(text.as_str(), "x = 1");
    }

    #[test]
    fn identity_hash_tracks_normalized_text() {
        let a = normalize("x = 1 // a", Language::C);
        let b = normalize("x   =   1", Language::C);
        assert_eq!(a.as_str(), "x = 1");
        assert_eq!(a, b);
        assert_eq!(normalize("x = 1 // a", Language::C).sha256_hex(), a.sha256_hex());
        assert_eq!(a.sha256_hex(), hash_normalized(NORMALIZER_VERSION, "x = 1"));
        assert_ne!(a.sha256_hex(), normalize("x = 2", Language::C).sha256_hex());
    }
}
