//! Text normalization for matching and search.
//!
//! Two variants exist and the distinction matters for search correctness:
//! [`norm`] strips punctuation and is applied to stored text at indexing
//! time, while [`normalize_query`] keeps punctuation and is applied to raw
//! queries compared against already-normalized text. Apply the same variant
//! to both sides of a comparison.

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref WHITESPACE_REGEX: Regex = Regex::new(r"\s+").unwrap();
    static ref PUNCTUATION_REGEX: Regex = Regex::new(r#"[.,!?;:()\[\]{}"'`~]"#).unwrap();
}

/// Normalizes text for indexing and comparison.
///
/// Applies Unicode canonical decomposition then recomposition (NFD→NFC),
/// lower-cases, collapses whitespace runs to single spaces, strips a fixed
/// set of punctuation characters, and re-collapses whitespace left behind by
/// the removal. Pure and total: any input yields a (possibly empty) string,
/// and the function is idempotent.
///
/// ```rust
/// assert_eq!(langres::normalize::norm("Hello,   World!"), "hello world");
/// ```
pub fn norm(text: &str) -> String {
    let collapsed = normalize_query(text);
    let stripped = PUNCTUATION_REGEX.replace_all(&collapsed, "");
    WHITESPACE_REGEX
        .replace_all(stripped.trim(), " ")
        .to_string()
}

/// Normalizes a search query: the Unicode, case, and whitespace steps of
/// [`norm`] without punctuation stripping.
pub fn normalize_query(query: &str) -> String {
    let recomposed: String = query.nfd().collect::<String>().nfc().collect();
    let lowered = recomposed.to_lowercase();
    WHITESPACE_REGEX
        .replace_all(lowered.trim(), " ")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_norm_strips_punctuation_and_case() {
        assert_eq!(norm("Hello,   World!"), "hello world");
        assert_eq!(norm("  Log In.  "), "log in");
        assert_eq!(norm("{brace}[bracket](paren)\"quote\"'tick'`back`~"), "bracebracketparenquotetickback");
    }

    #[test]
    fn test_norm_recollapses_whitespace_after_stripping() {
        // Punctuation between spaces must not leave a double space behind.
        assert_eq!(norm("a , b"), "a b");
        assert_eq!(norm("a ?! b"), "a b");
    }

    #[test]
    fn test_norm_empty_input() {
        assert_eq!(norm(""), "");
        assert_eq!(norm("   "), "");
        assert_eq!(norm("?!."), "");
    }

    #[test]
    fn test_norm_korean_text() {
        assert_eq!(norm("로그인 해주세요!"), "로그인 해주세요");
    }

    #[test]
    fn test_norm_unicode_recomposition() {
        // Decomposed "é" (e + combining acute) and precomposed "é" normalize
        // to the same string.
        assert_eq!(norm("Caf\u{0065}\u{0301}"), norm("Caf\u{00e9}"));
    }

    #[test]
    fn test_normalize_query_keeps_punctuation() {
        assert_eq!(normalize_query("Hello,   World!"), "hello, world!");
        assert_eq!(normalize_query("  Log In.  "), "log in.");
    }

    proptest! {
        #[test]
        fn norm_is_idempotent(s in "[ -~가-힣é]{0,40}") {
            let once = norm(&s);
            prop_assert_eq!(norm(&once), once.clone());
        }

        #[test]
        fn normalize_query_is_idempotent(s in "[ -~가-힣é]{0,40}") {
            let once = normalize_query(&s);
            prop_assert_eq!(normalize_query(&once), once.clone());
        }
    }
}
