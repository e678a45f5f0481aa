//! Core library for lyrics-analysis.
//!
//! This crate turns a provider's time-synced lyrics payload into word,
//! phrase and script statistics, and models the track search that leads up
//! to it. Network access and image rendering live behind traits
//! ([`catalog::CatalogSearch`], [`cloud::WordCloudRenderer`]) so the crate
//! itself performs no I/O beyond reading configuration.
//!
//! # Modules
//!
//! - [`lyrics`] - Payload decoding and line normalization
//! - [`text`] - Word splitting
//! - [`analysis`] - Repeated phrases, word frequencies, script counts
//! - [`cloud`] - Word-cloud frequency tables
//! - [`catalog`] - Search queries, response decoding, cached search
//! - [`session`] - Search → select → analyze state machine
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use lyrics_analysis_core::analysis::{self, DEFAULT_TOP_WORDS};
//!
//! let json = r#"{"lyrics": {"lines": [
//!     {"words": "I see you"},
//!     {"words": "♪"},
//!     {"words": "i see you"},
//!     {"words": "and I wonder"}
//! ]}}"#;
//!
//! let report = analysis::analyze_json(json, DEFAULT_TOP_WORDS).unwrap();
//! assert_eq!(report.line_count, 3);
//! assert_eq!(report.repeated_phrases[0].phrase, "i see you");
//! assert_eq!(report.unique_words, vec!["and", "wonder"]);
//! ```
#![deny(unsafe_code)]

pub mod analysis;
pub mod catalog;
pub mod cloud;
pub mod config;
pub mod error;
pub mod lyrics;
pub mod session;
pub mod text;

pub use analysis::{LyricsReport, analyze_json, analyze_lines, analyze_payload};
pub use config::{Config, ConfigLoader, LogLevel};
pub use error::{
    AnalysisError, AnalysisResult, CatalogError, CatalogResult, CloudError, ConfigError,
    ConfigResult, TransitionError,
};
pub use lyrics::{LineMap, LyricsPayload, normalize_lines};

/// Default maximum input size in bytes (5 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;

/// Reject inputs larger than `limit` bytes. `None` disables the check.
pub const fn check_input_size(size: usize, limit: Option<usize>) -> AnalysisResult<()> {
    match limit {
        Some(limit) if size > limit => Err(AnalysisError::InputTooLarge { size, limit }),
        _ => Ok(()),
    }
}
