//! Word-cloud frequency tables.
//!
//! Rendering is done by an external collaborator behind
//! [`WordCloudRenderer`]. This module only guarantees what the renderer
//! receives: unique keys and positive, finite weights.

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analysis::{LyricsReport, WordCount};
use crate::error::CloudError;

/// Canvas settings passed through to the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct WordCloudConfig {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Background color name or hex value.
    pub background: String,
}

impl Default for WordCloudConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
            background: "white".to_string(),
        }
    }
}

/// Which word list a cloud is drawn from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum CloudSource {
    /// Top words, weighted by count.
    #[default]
    Top,
    /// Words seen exactly once, weighted equally.
    Unique,
}

/// A word (or phrase) with its rendering weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeightedWord {
    /// The word to draw.
    pub word: String,
    /// Relative glyph size.
    pub weight: f64,
}

/// Validated word → weight table, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct WordCloudFrequencies {
    entries: Vec<WeightedWord>,
}

impl WordCloudFrequencies {
    /// Build a table from `(word, weight)` pairs.
    ///
    /// Later duplicates of a word are ignored. Fails if any weight is zero,
    /// negative, or not finite.
    pub fn new<I, S>(pairs: I) -> Result<Self, CloudError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        for (word, weight) in pairs {
            let word = word.into();
            if !(weight.is_finite() && weight > 0.0) {
                return Err(CloudError::NonPositiveWeight { word, weight });
            }
            if seen.insert(word.clone()) {
                entries.push(WeightedWord { word, weight });
            }
        }
        Ok(Self { entries })
    }

    /// Weight each word by its occurrence count.
    pub fn from_top_words(words: &[WordCount]) -> Self {
        Self::counted(words.iter().map(|w| (w.word.as_str(), w.count)))
    }

    /// Give every word the same weight of 1.
    pub fn from_unique_words<S: AsRef<str>>(words: &[S]) -> Self {
        Self::counted(words.iter().map(|w| (w.as_ref(), 1)))
    }

    /// Build the table for `source` from a finished report.
    pub fn from_report(report: &LyricsReport, source: CloudSource) -> Self {
        match source {
            CloudSource::Top => Self::from_top_words(&report.top_words),
            CloudSource::Unique => Self::from_unique_words(&report.unique_words),
        }
    }

    fn counted<'a>(pairs: impl Iterator<Item = (&'a str, usize)>) -> Self {
        let mut seen = HashSet::new();
        let entries = pairs
            .filter(|(_, count)| *count > 0)
            .filter(|(word, _)| seen.insert(*word))
            .map(|(word, count)| WeightedWord {
                word: word.to_string(),
                weight: count as f64,
            })
            .collect();
        Self { entries }
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[WeightedWord] {
        &self.entries
    }

    /// Weight for `word`, if present.
    pub fn weight(&self, word: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.word == word)
            .map(|e| e.weight)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Renders a frequency table into an image (or any other artifact).
pub trait WordCloudRenderer {
    /// What rendering produces.
    type Output;
    /// Error produced by the renderer.
    type Error: From<CloudError>;

    /// Render `frequencies` using `config`.
    fn render(
        &self,
        frequencies: &WordCloudFrequencies,
        config: &WordCloudConfig,
    ) -> Result<Self::Output, Self::Error>;
}

/// Render a table, rejecting empty input before the renderer sees it.
pub fn render_cloud<R: WordCloudRenderer>(
    renderer: &R,
    frequencies: &WordCloudFrequencies,
    config: &WordCloudConfig,
) -> Result<R::Output, R::Error> {
    if frequencies.is_empty() {
        return Err(CloudError::Empty.into());
    }
    tracing::debug!(words = frequencies.len(), "rendering word cloud");
    renderer.render(frequencies, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Listing;

    impl WordCloudRenderer for Listing {
        type Output = String;
        type Error = CloudError;

        fn render(
            &self,
            frequencies: &WordCloudFrequencies,
            config: &WordCloudConfig,
        ) -> Result<String, CloudError> {
            let words: Vec<_> = frequencies
                .entries()
                .iter()
                .map(|e| format!("{}={}", e.word, e.weight))
                .collect();
            Ok(format!("{}x{} {}", config.width, config.height, words.join(",")))
        }
    }

    fn wc(word: &str, count: usize) -> WordCount {
        WordCount {
            word: word.to_string(),
            count,
        }
    }

    #[test]
    fn top_words_keep_counts_and_order() {
        let table = WordCloudFrequencies::from_top_words(&[wc("i", 3), wc("see", 2)]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.entries()[0].word, "i");
        assert_eq!(table.weight("i"), Some(3.0));
        assert_eq!(table.weight("see"), Some(2.0));
    }

    #[test]
    fn unique_words_get_uniform_weight() {
        let table = WordCloudFrequencies::from_unique_words(&["and", "wonder"]);
        assert!(table.entries().iter().all(|e| (e.weight - 1.0).abs() < f64::EPSILON));
    }

    #[test]
    fn rejects_non_positive_weights() {
        assert!(matches!(
            WordCloudFrequencies::new([("zero", 0.0)]),
            Err(CloudError::NonPositiveWeight { .. })
        ));
        assert!(WordCloudFrequencies::new([("nan", f64::NAN)]).is_err());
        assert!(WordCloudFrequencies::new([("neg", -1.0)]).is_err());
    }

    #[test]
    fn duplicate_keys_keep_first() {
        let table = WordCloudFrequencies::new([("la", 2.0), ("la", 5.0)]).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.weight("la"), Some(2.0));
    }

    #[test]
    fn renders_through_collaborator() {
        let table = WordCloudFrequencies::from_top_words(&[wc("yellow", 4)]);
        let out = render_cloud(&Listing, &table, &WordCloudConfig::default()).unwrap();
        assert_eq!(out, "800x400 yellow=4");
    }

    #[test]
    fn empty_table_is_not_rendered() {
        let err = render_cloud(&Listing, &WordCloudFrequencies::default(), &WordCloudConfig::default())
            .unwrap_err();
        assert_eq!(err, CloudError::Empty);
    }

    #[test]
    fn report_source_selects_word_list() {
        let report = crate::analysis::analyze_lines(
            &crate::lyrics::LineMap::from_texts(["la la land", "oh"]),
            crate::analysis::DEFAULT_TOP_WORDS,
        );
        let top = WordCloudFrequencies::from_report(&report, CloudSource::Top);
        assert_eq!(top.weight("la"), Some(2.0));
        let unique = WordCloudFrequencies::from_report(&report, CloudSource::Unique);
        assert_eq!(unique.weight("la"), None);
        assert_eq!(unique.weight("land"), Some(1.0));
    }

    #[test]
    fn serializes_as_list() {
        let table = WordCloudFrequencies::from_unique_words(&["oh"]);
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json, serde_json::json!([{"word": "oh", "weight": 1.0}]));
    }
}
