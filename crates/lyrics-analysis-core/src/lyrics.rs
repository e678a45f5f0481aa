//! Lyrics payload decoding and line normalization.
//!
//! The provider returns one record per displayed line. Instrumental breaks
//! come through as empty text or a lone [`PLACEHOLDER`] glyph; [`normalize_lines`]
//! drops those and keeps everything else verbatim, keyed by the line's
//! position in the payload.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};

/// Glyph the provider uses for instrumental lines.
pub const PLACEHOLDER: &str = "♪";

/// A lyrics response as returned by the lyrics provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LyricsPayload {
    /// The lyrics body.
    pub lyrics: LyricsBody,
}

/// Lines plus provider metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LyricsBody {
    /// Ordered line records.
    pub lines: Vec<LyricsLine>,
    /// Synchronization granularity reported by the provider (e.g. `LINE_SYNCED`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync_type: Option<String>,
    /// Upstream lyrics source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// Language code reported by the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Whether the lyrics are in a right-to-left script.
    #[serde(default)]
    pub is_rtl_language: bool,
}

/// A single line record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LyricsLine {
    /// Raw line text. May be absent, empty, or the placeholder glyph.
    #[serde(default)]
    pub words: Option<String>,
    /// Display time in milliseconds, as the provider's decimal string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time_ms: Option<String>,
}

impl LyricsLine {
    /// Create a line record from raw text.
    pub fn new(words: impl Into<String>) -> Self {
        Self {
            words: Some(words.into()),
            start_time_ms: None,
        }
    }
}

impl LyricsPayload {
    /// Build a payload from raw line texts, in order.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lyrics: LyricsBody {
                lines: lines.into_iter().map(LyricsLine::new).collect(),
                ..LyricsBody::default()
            },
        }
    }

    /// Decode a payload from JSON text.
    ///
    /// Fails with [`AnalysisError::InvalidPayload`] if `lyrics` or
    /// `lyrics.lines` is missing or mistyped.
    pub fn from_json(json: &str) -> AnalysisResult<Self> {
        serde_json::from_str(json).map_err(|e| AnalysisError::InvalidPayload(e.to_string()))
    }

    /// Decode a payload from JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> AnalysisResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| AnalysisError::InvalidPayload(e.to_string()))
    }
}

/// A kept lyric line and its position in the original payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LyricLine {
    /// Zero-based position in the payload, counting dropped lines.
    pub index: usize,
    /// Line text exactly as received.
    pub text: String,
}

/// Ordered lyric lines with instrumental and empty lines removed.
///
/// No entry is empty or equal to [`PLACEHOLDER`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct LineMap {
    lines: Vec<LyricLine>,
}

impl LineMap {
    /// Build a map from line texts, indexing them by position.
    ///
    /// Empty and placeholder texts are skipped but still consume an index.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines = texts
            .into_iter()
            .map(Into::into)
            .enumerate()
            .filter(|(_, text)| is_lyric_text(text))
            .map(|(index, text)| LyricLine { index, text })
            .collect();
        Self { lines }
    }

    /// Iterate over kept lines in payload order.
    pub fn iter(&self) -> std::slice::Iter<'_, LyricLine> {
        self.lines.iter()
    }

    /// Iterate over line texts in payload order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|l| l.text.as_str())
    }

    /// Look up a line by its payload index.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.lines
            .iter()
            .find(|l| l.index == index)
            .map(|l| l.text.as_str())
    }

    /// Number of kept lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether no lines were kept.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Join all line texts with `\n`, in payload order.
    pub fn joined(&self) -> String {
        self.texts().collect::<Vec<_>>().join("\n")
    }
}

impl<'a> IntoIterator for &'a LineMap {
    type Item = &'a LyricLine;
    type IntoIter = std::slice::Iter<'a, LyricLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn is_lyric_text(text: &str) -> bool {
    !text.is_empty() && text != PLACEHOLDER
}

/// Convert a payload into a [`LineMap`].
///
/// Text is kept unmodified: no trimming, no case change.
#[tracing::instrument(skip_all, fields(line_count = payload.lyrics.lines.len()))]
pub fn normalize_lines(payload: &LyricsPayload) -> LineMap {
    let lines: Vec<LyricLine> = payload
        .lyrics
        .lines
        .iter()
        .enumerate()
        .filter_map(|(index, line)| {
            line.words
                .as_deref()
                .filter(|text| is_lyric_text(text))
                .map(|text| LyricLine {
                    index,
                    text: text.to_string(),
                })
        })
        .collect();

    tracing::debug!(kept = lines.len(), "normalized lyric lines");
    LineMap { lines }
}
