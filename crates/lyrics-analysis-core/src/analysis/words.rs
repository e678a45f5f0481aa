//! Word frequency statistics.

use crate::text;

use super::frequency::FrequencyTable;
use super::reports::WordCount;

/// Number of entries in the top-words ranking unless configured otherwise.
pub const DEFAULT_TOP_WORDS: usize = 10;

/// Word counts for a block of lyrics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordStatistics {
    /// Total words, duplicates included.
    pub word_count: usize,
    /// Occurrences of each lowercased word, in first-seen order.
    pub frequencies: FrequencyTable,
    /// Highest-count words, ties in first-seen order.
    pub top_words: Vec<WordCount>,
    /// Words seen exactly once, in first-seen order.
    pub unique_words: Vec<String>,
}

/// Tokenize `text` and compute word count, top words, and once-only words.
///
/// See [`text::split_words`] for the word boundary rule.
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
pub fn analyze_words(text: &str, top_n: usize) -> WordStatistics {
    let words = text::split_words_lower(text);
    let word_count = words.len();

    let frequencies: FrequencyTable = words.into_iter().collect();

    let top_words: Vec<WordCount> = frequencies
        .most_common(top_n)
        .into_iter()
        .map(|(word, count)| WordCount {
            word: word.to_string(),
            count,
        })
        .collect();
    tracing::debug!(?top_words, "ranked words");

    let unique_words: Vec<String> = frequencies.with_count(1).map(str::to_string).collect();

    WordStatistics {
        word_count,
        frequencies,
        top_words,
        unique_words,
    }
}
