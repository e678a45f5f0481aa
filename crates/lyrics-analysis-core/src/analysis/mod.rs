//! Lyrics text analysis.
//!
//! [`normalize_lines`](crate::lyrics::normalize_lines) feeds three independent
//! analyses, orchestrated by [`analyze_lines`]:
//!
//! - [`repeated`]: whole-line repetition
//! - [`words`]: word count, top words, once-only words
//! - [`scripts`]: Korean/Chinese/Japanese character counts
//!
//! Each is a pure function in its own module; callers can also invoke them
//! individually.

pub mod frequency;
pub mod repeated;
pub mod reports;
pub mod scripts;
pub mod words;

pub use frequency::FrequencyTable;
pub use reports::{LyricsReport, PhraseCount, WordCount};
pub use scripts::{Script, ScriptCounts};
pub use words::DEFAULT_TOP_WORDS;

use crate::error::AnalysisResult;
use crate::lyrics::{self, LineMap, LyricsPayload};

/// Run every analysis over already-normalized lines.
///
/// Never fails: an empty map yields zero counts and empty lists.
#[tracing::instrument(skip(lines), fields(line_count = lines.len()))]
pub fn analyze_lines(lines: &LineMap, top_n: usize) -> LyricsReport {
    let phrases = repeated::find_repeated_phrases(lines);

    let text = lines.joined();
    let stats = words::analyze_words(&text, top_n);
    let script_counts = scripts::count_scripts(&text);

    tracing::info!(
        word_count = stats.word_count,
        unique = stats.unique_words.len(),
        repeated = phrases.repeated.len(),
        "lyrics analyzed"
    );

    LyricsReport {
        line_count: lines.len(),
        word_count: stats.word_count,
        top_words: stats.top_words,
        unique_words: stats.unique_words,
        repeated_phrases: phrases.repeated,
        script_counts,
        language: None,
        is_rtl_language: false,
    }
}

/// Normalize a decoded payload and analyze it.
///
/// Provider metadata (language, right-to-left flag) is copied into the
/// report unchanged.
pub fn analyze_payload(payload: &LyricsPayload, top_n: usize) -> LyricsReport {
    let lines = lyrics::normalize_lines(payload);
    LyricsReport {
        language: payload.lyrics.language.clone(),
        is_rtl_language: payload.lyrics.is_rtl_language,
        ..analyze_lines(&lines, top_n)
    }
}

/// Decode a JSON lyrics payload and analyze it.
///
/// Fails only if the payload cannot be decoded; nothing is analyzed then.
pub fn analyze_json(json: &str, top_n: usize) -> AnalysisResult<LyricsReport> {
    let payload = LyricsPayload::from_json(json)?;
    Ok(analyze_payload(&payload, top_n))
}
