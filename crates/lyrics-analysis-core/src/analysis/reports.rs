//! Report structs for lyrics analysis.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for
//! use in both CLI JSON output and MCP tool responses.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::scripts::ScriptCounts;

/// Full lyrics analysis for one track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LyricsReport {
    /// Number of lyric lines kept after normalization.
    pub line_count: usize,
    /// Total words, duplicates included.
    pub word_count: usize,
    /// Most frequent lowercased words, highest first.
    pub top_words: Vec<WordCount>,
    /// Lowercased words that occur exactly once, in first-seen order.
    pub unique_words: Vec<String>,
    /// Lines that occur more than once, most repeated first.
    pub repeated_phrases: Vec<PhraseCount>,
    /// Characters per writing system; scripts with no characters are absent.
    pub script_counts: ScriptCounts,
    /// Language reported by the lyrics provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Whether the provider flagged the lyrics as right-to-left.
    #[serde(default)]
    pub is_rtl_language: bool,
}

impl LyricsReport {
    /// Number of words that occur exactly once.
    pub fn unique_word_count(&self) -> usize {
        self.unique_words.len()
    }
}

// -- Words ------------------------------------------------------------------

/// A lowercased word and its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WordCount {
    /// The word.
    pub word: String,
    /// Number of occurrences.
    pub count: usize,
}

// -- Phrases ----------------------------------------------------------------

/// A lowercased lyric line and its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PhraseCount {
    /// The line text, lowercased.
    pub phrase: String,
    /// Number of occurrences.
    pub count: usize,
}
