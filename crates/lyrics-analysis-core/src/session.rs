//! Search-and-analyze session state.
//!
//! A session moves from searching, to picking a track, to showing that
//! track's analysis. Transitions are explicit: [`SessionState::apply`] takes
//! an [`Event`] and moves to the next state or returns a [`TransitionError`].
//!
//! ```text
//! Idle ──SubmitSearch──▶ SearchResultsShown ──SelectTrack──▶ TrackSelected
//!                                ▲                                │
//!                                │                          LyricsFetched
//!                                │                                ▼
//!                                └──SelectTrack── AnalysisReady / AnalysisFailed
//! ```
//!
//! `SubmitSearch` and `Reset` are accepted from every state.

use crate::analysis::{self, LyricsReport};
use crate::catalog::TrackSummary;
use crate::error::{AnalysisError, TransitionError};
use crate::lyrics::LyricsPayload;

/// Where the user is in the search → analysis flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing searched yet.
    #[default]
    Idle,
    /// A result list is on screen.
    SearchResultsShown {
        /// Ranked search results.
        results: Vec<TrackSummary>,
    },
    /// A track was picked and its lyrics are being fetched.
    TrackSelected {
        /// Results the track was picked from.
        results: Vec<TrackSummary>,
        /// The selected track.
        track: TrackSummary,
    },
    /// Lyrics were fetched and analyzed.
    AnalysisReady {
        /// Results the track was picked from.
        results: Vec<TrackSummary>,
        /// The analyzed track.
        track: TrackSummary,
        /// The analysis.
        report: Box<LyricsReport>,
    },
    /// No lyrics were available for the track.
    AnalysisFailed {
        /// Results the track was picked from.
        results: Vec<TrackSummary>,
        /// The track without lyrics.
        track: TrackSummary,
        /// User-facing reason.
        reason: String,
    },
}

/// Input that drives a session forward.
#[derive(Debug)]
pub enum Event {
    /// A search completed with these results.
    SubmitSearch(Vec<TrackSummary>),
    /// The user picked the track with this id.
    SelectTrack(String),
    /// The lyrics fetch for the selected track finished.
    LyricsFetched(Result<LyricsPayload, AnalysisError>),
    /// Start over.
    Reset,
}

impl Event {
    const fn name(&self) -> &'static str {
        match self {
            Self::SubmitSearch(_) => "SubmitSearch",
            Self::SelectTrack(_) => "SelectTrack",
            Self::LyricsFetched(_) => "LyricsFetched",
            Self::Reset => "Reset",
        }
    }
}

impl SessionState {
    /// Name of the current state.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::SearchResultsShown { .. } => "SearchResultsShown",
            Self::TrackSelected { .. } => "TrackSelected",
            Self::AnalysisReady { .. } => "AnalysisReady",
            Self::AnalysisFailed { .. } => "AnalysisFailed",
        }
    }

    /// Results currently on screen, if any.
    pub fn results(&self) -> &[TrackSummary] {
        match self {
            Self::Idle => &[],
            Self::SearchResultsShown { results }
            | Self::TrackSelected { results, .. }
            | Self::AnalysisReady { results, .. }
            | Self::AnalysisFailed { results, .. } => results,
        }
    }

    /// The selected track, if any.
    pub const fn track(&self) -> Option<&TrackSummary> {
        match self {
            Self::Idle | Self::SearchResultsShown { .. } => None,
            Self::TrackSelected { track, .. }
            | Self::AnalysisReady { track, .. }
            | Self::AnalysisFailed { track, .. } => Some(track),
        }
    }

    /// The finished analysis, if any.
    pub fn report(&self) -> Option<&LyricsReport> {
        match self {
            Self::AnalysisReady { report, .. } => Some(report.as_ref()),
            _ => None,
        }
    }

    /// Apply `event`, analyzing lyrics with `top_n` top words when they arrive.
    ///
    /// A rejected event leaves the session unchanged.
    #[tracing::instrument(skip_all, fields(state = self.name(), event = event.name()))]
    pub fn apply(&mut self, event: Event, top_n: usize) -> Result<(), TransitionError> {
        match std::mem::take(self).transition(event, top_n) {
            Ok(next) => {
                tracing::debug!(next = next.name(), "session transition");
                *self = next;
                Ok(())
            }
            Err((previous, err)) => {
                *self = previous;
                Err(err)
            }
        }
    }

    fn transition(self, event: Event, top_n: usize) -> Result<Self, (Self, TransitionError)> {
        let reject = |state: Self, event: &Event| {
            let err = TransitionError {
                state: state.name(),
                event: event.name(),
            };
            Err((state, err))
        };

        match (self, event) {
            (_, Event::Reset) => Ok(Self::Idle),
            (_, Event::SubmitSearch(results)) => Ok(Self::SearchResultsShown { results }),
            (
                state @ (Self::SearchResultsShown { .. }
                | Self::AnalysisReady { .. }
                | Self::AnalysisFailed { .. }),
                Event::SelectTrack(id),
            ) => {
                let Some(track) = state.results().iter().find(|t| t.id == id).cloned() else {
                    return reject(state, &Event::SelectTrack(id));
                };
                let results = state.into_results();
                Ok(Self::TrackSelected { results, track })
            }
            (Self::TrackSelected { results, track }, Event::LyricsFetched(Ok(payload))) => {
                let report = analysis::analyze_payload(&payload, top_n);
                Ok(Self::AnalysisReady {
                    results,
                    track,
                    report: Box::new(report),
                })
            }
            (Self::TrackSelected { results, track }, Event::LyricsFetched(Err(err))) => {
                tracing::debug!(error = %err, track = %track.id, "lyrics unavailable");
                let reason = format!("No lyrics found for track {}.", track.track_name);
                Ok(Self::AnalysisFailed {
                    results,
                    track,
                    reason,
                })
            }
            (state, event) => reject(state, &event),
        }
    }

    fn into_results(self) -> Vec<TrackSummary> {
        match self {
            Self::Idle => Vec::new(),
            Self::SearchResultsShown { results }
            | Self::TrackSelected { results, .. }
            | Self::AnalysisReady { results, .. }
            | Self::AnalysisFailed { results, .. } => results,
        }
    }
}
