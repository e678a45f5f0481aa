//! Error types for lyrics-analysis-core.

use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while preparing lyrics for analysis.
///
/// The pipeline itself cannot fail once a payload has been decoded; every
/// variant here is raised at the input boundary.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The lyrics payload is missing its line list or has the wrong shape.
    #[error("invalid lyrics payload: {0}")]
    InvalidPayload(String),

    /// The input exceeds the configured size limit.
    #[error("input too large: {size} bytes (limit: {limit} bytes)")]
    InputTooLarge {
        /// Size of the rejected input in bytes.
        size: usize,
        /// Configured limit in bytes.
        limit: usize,
    },
}

/// Result type alias using [`AnalysisError`].
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Errors raised at the music catalog boundary.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// None of track, artist or album was provided.
    #[error("enter at least one of: track, artist, album")]
    EmptyQuery,

    /// The catalog returned a response that does not match the schema.
    #[error("invalid catalog response: {0}")]
    InvalidResponse(String),

    /// The search collaborator failed.
    #[error("catalog search failed: {0}")]
    Search(String),
}

/// Result type alias using [`CatalogError`].
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors raised when building a word-cloud frequency table.
#[derive(Error, Debug, PartialEq)]
pub enum CloudError {
    /// A weight was zero, negative, or not finite.
    #[error("weight for {word:?} must be a positive number, got {weight}")]
    NonPositiveWeight {
        /// The offending word.
        word: String,
        /// The rejected weight.
        weight: f64,
    },

    /// The table has no entries to render.
    #[error("no words to render")]
    Empty,
}

/// An event that is not valid in the current session state.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("cannot apply {event} while {state}")]
pub struct TransitionError {
    /// Name of the state the session was in.
    pub state: &'static str,
    /// Name of the rejected event.
    pub event: &'static str,
}
