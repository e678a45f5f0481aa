//! Text processing utilities.
//!
//! Word splitting shared by the word statistics and script analyses.

use regex::Regex;
use std::sync::LazyLock;

/// Runs of commas, double quotes, whitespace, parentheses, `?` and `!`.
///
/// Apostrophes, hyphens and periods are deliberately absent, so "don't"
/// and "rock-n-roll" stay whole.
static WORD_DELIMITERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[,"\s()?!]+"#).expect("valid regex"));

/// Split text into words, preserving case.
///
/// Empty tokens (from leading or trailing delimiters) are dropped.
pub fn split_words(text: &str) -> Vec<&str> {
    WORD_DELIMITERS
        .split(text)
        .filter(|w| !w.is_empty())
        .collect()
}

/// Split text into lowercased words.
pub fn split_words_lower(text: &str) -> Vec<String> {
    split_words(text).into_iter().map(str::to_lowercase).collect()
}
