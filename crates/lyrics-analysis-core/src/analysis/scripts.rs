//! Writing-system breakdown by Unicode block.
//!
//! Only three East Asian scripts are recognized. Han ideographs stand in for
//! Chinese and kana for Japanese, so kanji in Japanese lyrics count as
//! Chinese.

use std::collections::BTreeMap;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A writing system recognized by code-point range.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum Script {
    /// Hangul syllables (U+AC00–U+D7AF).
    Korean,
    /// CJK unified ideographs (U+4E00–U+9FFF).
    Chinese,
    /// Hiragana and katakana (U+3040–U+30FF).
    Japanese,
}

/// Character counts per script. Scripts with no characters are absent.
pub type ScriptCounts = BTreeMap<Script, usize>;

impl Script {
    /// All recognized scripts, in report order.
    pub const ALL: [Self; 3] = [Self::Korean, Self::Chinese, Self::Japanese];

    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Korean => "Korean",
            Self::Chinese => "Chinese",
            Self::Japanese => "Japanese",
        }
    }

    /// Whether `ch` belongs to this script's range.
    pub const fn contains(self, ch: char) -> bool {
        let cp = ch as u32;
        match self {
            Self::Korean => matches!(cp, 0xAC00..=0xD7AF),
            Self::Chinese => matches!(cp, 0x4E00..=0x9FFF),
            Self::Japanese => matches!(cp, 0x3040..=0x309F | 0x30A0..=0x30FF),
        }
    }

    /// The script `ch` belongs to, if any. The ranges do not overlap.
    pub fn of(ch: char) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.contains(ch))
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Count characters of each recognized script in `text`.
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
pub fn count_scripts(text: &str) -> ScriptCounts {
    let mut counts = ScriptCounts::new();
    for script in text.chars().filter_map(Script::of) {
        *counts.entry(script).or_insert(0) += 1;
    }
    tracing::debug!(?counts, "counted script characters");
    counts
}
