// SPDX-License-Identifier: MPL-2.0
//! Interaction event types.

use chrono::{DateTime, Utc};
use std::fmt;

/// How a set of files reached the upload surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferSource {
    Drop,
    Picker,
    CommandLine,
}

impl fmt::Display for OfferSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OfferSource::Drop => "drop",
            OfferSource::Picker => "picker",
            OfferSource::CommandLine => "command_line",
        })
    }
}

/// User-initiated actions worth remembering.
#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    // ==========================================================================
    // Upload flow
    // ==========================================================================
    /// Files were offered; `accepted` of `offered` were video-typed.
    FilesOffered {
        source: OfferSource,
        offered: usize,
        accepted: usize,
    },

    /// A batch was submitted and the analysis began.
    AnalysisStarted { file_count: usize },

    /// The analysis delay elapsed and the gallery appeared.
    ResultsShown,

    // ==========================================================================
    // Results
    // ==========================================================================
    /// A catalog card was selected.
    RecordSelected { id: String },

    /// One of the action bar buttons was clicked.
    ActionTriggered { id: &'static str },

    // ==========================================================================
    // Playback
    // ==========================================================================
    /// Play/pause toggled; `playing` is the new state.
    PlaybackToggled { playing: bool },

    /// Seek to a position in the detail player.
    PlaybackSeeked { position_secs: f64 },
}

impl fmt::Display for UserAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserAction::FilesOffered {
                source,
                offered,
                accepted,
            } => write!(f, "{accepted} of {offered} files accepted via {source}"),
            UserAction::AnalysisStarted { file_count } => {
                write!(f, "analysis started for {file_count} files")
            }
            UserAction::ResultsShown => f.write_str("results shown"),
            UserAction::RecordSelected { id } => write!(f, "episode {id} selected"),
            UserAction::ActionTriggered { id } => write!(f, "{id} button clicked"),
            UserAction::PlaybackToggled { playing } => {
                f.write_str(if *playing { "playback started" } else { "playback paused" })
            }
            UserAction::PlaybackSeeked { position_secs } => {
                write!(f, "seeked to {position_secs:.1}s")
            }
        }
    }
}

/// A [`UserAction`] with the time it happened.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionEvent {
    pub timestamp: DateTime<Utc>,
    pub action: UserAction,
}
