//! Query-term highlighting for rendered result lines
//!
//! Wraps every case-insensitive occurrence of the query term in
//! `<mark>..</mark>` so the terminal/markdown layer can emphasise it. The
//! term is treated as literal text; regex metacharacters in user input must
//! never change the match semantics.

use regex::RegexBuilder;

/// Wrap each occurrence of `term` inside `text` in `<mark>` tags.
///
/// Matching is case-insensitive and the matched slice keeps its original
/// casing. A blank term returns the input unchanged.
pub fn highlight_term(text: &str, term: &str) -> String {
    let term = term.trim();
    if term.is_empty() {
        return text.to_string();
    }

    let pattern = regex::escape(term);
    let Ok(re) = RegexBuilder::new(&pattern).case_insensitive(true).build() else {
        // Escaped literals always compile; if that ever changes, show the
        // text un-highlighted rather than fail the render.
        return text.to_string();
    };

    re.replace_all(text, "<mark>$0</mark>").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_all_occurrences() {
        assert_eq!(
            highlight_term("Cat blade for Cat 140M", "cat"),
            "<mark>Cat</mark> blade for <mark>Cat</mark> 140M"
        );
    }

    #[test]
    fn test_preserves_original_casing() {
        assert_eq!(highlight_term("HYDRAULIC pump", "hydraulic"), "<mark>HYDRAULIC</mark> pump");
    }

    #[test]
    fn test_metacharacters_are_literal() {
        assert_eq!(highlight_term("price (USD)", "(USD)"), "price <mark>(USD)</mark>");
        assert_eq!(highlight_term("a.c", "a.c"), "<mark>a.c</mark>");
        // A dot must not act as a wildcard
        assert_eq!(highlight_term("abc", "a.c"), "abc");
    }

    #[test]
    fn test_blank_term_is_identity() {
        assert_eq!(highlight_term("1R-0742", ""), "1R-0742");
        assert_eq!(highlight_term("1R-0742", "   "), "1R-0742");
    }

    #[test]
    fn test_no_match_is_identity() {
        assert_eq!(highlight_term("ripper shank", "blade"), "ripper shank");
    }
}
