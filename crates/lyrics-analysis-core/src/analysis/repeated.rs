//! Repeated phrase detection.
//!
//! A phrase is a whole lyric line. Lines are compared case-insensitively.

use crate::lyrics::LineMap;

use super::frequency::FrequencyTable;
use super::reports::PhraseCount;

/// Line occurrence counts plus the lines that repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhraseRepetition {
    /// Occurrences of every distinct lowercased line, in first-seen order.
    pub occurrences: FrequencyTable,
    /// Lines seen more than once, most repeated first, ties in first-seen order.
    pub repeated: Vec<PhraseCount>,
}

/// Count each lowercased line and collect those that appear more than once.
#[tracing::instrument(skip_all, fields(line_count = lines.len()))]
pub fn find_repeated_phrases(lines: &LineMap) -> PhraseRepetition {
    let occurrences: FrequencyTable = lines.texts().map(str::to_lowercase).collect();

    let repeated: Vec<PhraseCount> = occurrences
        .above(1)
        .into_iter()
        .map(|(phrase, count)| PhraseCount {
            phrase: phrase.to_string(),
            count,
        })
        .collect();

    tracing::debug!(
        distinct = occurrences.len(),
        repeated = repeated.len(),
        "counted phrases"
    );

    PhraseRepetition {
        occurrences,
        repeated,
    }
}
