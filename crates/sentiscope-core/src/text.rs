//! Text normalization and input validation

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"http\S+|www\.\S+").expect("valid url pattern"));

static REPEATED_PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[!?.]{2,}").expect("valid punctuation pattern"));

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Reason reported for empty or whitespace-only input
pub const EMPTY_TEXT: &str = "Text cannot be empty";

/// Clean text before it reaches a classifier.
///
/// URL tokens are dropped outright (adjacent words may merge), any run of
/// two or more `!`, `?` or `.` shrinks to its last character, and whitespace
/// runs become a single space with the ends trimmed. Whitespace goes last so the result
/// is a fixed point of this function.
pub fn normalize(text: &str) -> String {
    let without_urls = URL_PATTERN.replace_all(text, "");
    let squashed = REPEATED_PUNCTUATION.replace_all(&without_urls, |caps: &regex::Captures| {
        caps[0][caps[0].len() - 1..].to_string()
    });
    WHITESPACE.replace_all(&squashed, " ").trim().to_string()
}

/// Reject empty or over-length input.
///
/// Length is measured in characters on the raw, pre-normalization text.
pub fn validate(text: &str, max_length: usize) -> Result<()> {
    if text.trim().is_empty() {
        return Err(Error::validation(EMPTY_TEXT));
    }

    if text.chars().count() > max_length {
        return Err(Error::validation(format!(
            "Text exceeds maximum length of {} characters",
            max_length
        )));
    }

    Ok(())
}

/// Shorten text for display, appending `...` when anything was cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("  hello \n\t world  "), "hello world");
    }

    #[test]
    fn test_normalize_strips_urls() {
        assert_eq!(
            normalize("check https://example.com/x?y=1 and www.site.org now"),
            "check and now"
        );
    }

    #[test]
    fn test_normalize_url_removal_merges_words() {
        assert_eq!(normalize("nicehttp://x.io"), "nice");
    }

    #[test]
    fn test_normalize_squashes_punctuation() {
        assert_eq!(normalize("Wow!!! Really??? Hmm....."), "Wow! Really? Hmm.");
    }

    #[test]
    fn test_normalize_squashes_mixed_punctuation_to_last() {
        assert_eq!(normalize("What?!"), "What!");
        assert_eq!(normalize("Really?!?."), "Really.");
        assert_eq!(normalize("Wait... what?! ok."), "Wait. what! ok.");
    }

    #[test]
    fn test_validate_rejects_whitespace() {
        let err = validate(" \n\t ", 10).unwrap_err();
        assert_eq!(err.to_string(), EMPTY_TEXT);
    }

    #[test]
    fn test_validate_length_boundary() {
        assert!(validate("abcde", 5).is_ok());
        let err = validate("abcdef", 5).unwrap_err();
        assert_eq!(err.to_string(), "Text exceeds maximum length of 5 characters");
    }

    #[test]
    fn test_validate_counts_characters_not_bytes() {
        assert!(validate("ééééé", 5).is_ok());
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("short", 100), "short");
        let long = "x".repeat(150);
        let cut = truncate_chars(&long, 100);
        assert_eq!(cut.len(), 103);
        assert!(cut.ends_with("..."));
    }
}
