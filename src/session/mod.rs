// SPDX-License-Identifier: MPL-2.0
//! The upload → analyze → results state machine.
//!
//! [`Session`] owns everything the window shows about the current upload
//! cycle: the accepted files, the phase, the prompt text and the pending
//! analysis deadline. The view layer reads it and drives it through the
//! operations below; it never changes the phase itself.
//!
//! Time is passed in explicitly (`now: Instant`), so the whole flow can be
//! tested without sleeping.
//!
//! ```text
//! Idle --submit_files--> Analyzing --tick(now >= deadline)--> ShowingResults
//! ```
//!
//! `ShowingResults` is terminal.

use crate::catalog::Catalog;
use crate::media::{UploadBatch, UploadedFile};
use std::fmt;
use std::time::{Duration, Instant};

/// Where the session is in the flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Analyzing {
        started_at: Instant,
        /// `None` once the pending transition was discarded.
        deadline: Option<Instant>,
    },
    ShowingResults {
        selected: Option<String>,
    },
}

impl Phase {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Phase::Idle)
    }

    #[must_use]
    pub fn is_analyzing(&self) -> bool {
        matches!(self, Phase::Analyzing { .. })
    }

    #[must_use]
    pub fn is_showing_results(&self) -> bool {
        matches!(self, Phase::ShowingResults { .. })
    }
}

/// Why a batch was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    /// A batch was already submitted in this session.
    NotIdle,
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::NotIdle => write!(f, "files can only be submitted while idle"),
        }
    }
}

impl std::error::Error for SubmitError {}

/// A phase change reported by [`Session::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The analysis delay elapsed and the results are now shown.
    ResultsReady,
}

/// View state of one window.
#[derive(Debug, Clone)]
pub struct Session {
    phase: Phase,
    uploaded_files: Vec<UploadedFile>,
    prompt: String,
    analysis_delay: Duration,
}

impl Session {
    #[must_use]
    pub fn new(analysis_delay: Duration) -> Self {
        Self {
            phase: Phase::Idle,
            uploaded_files: Vec::new(),
            prompt: String::new(),
            analysis_delay,
        }
    }

    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    #[must_use]
    pub fn uploaded_files(&self) -> &[UploadedFile] {
        &self.uploaded_files
    }

    #[must_use]
    pub fn analysis_delay(&self) -> Duration {
        self.analysis_delay
    }

    /// Accepts a filtered batch and starts the analysis.
    ///
    /// Only valid while idle. In any other phase nothing changes.
    pub fn submit_files(&mut self, batch: UploadBatch, now: Instant) -> Result<(), SubmitError> {
        if !self.phase.is_idle() {
            tracing::debug!(phase = ?self.phase, "ignoring submit outside Idle");
            return Err(SubmitError::NotIdle);
        }

        self.uploaded_files = batch.into_files();
        self.phase = Phase::Analyzing {
            started_at: now,
            deadline: Some(now + self.analysis_delay),
        };
        tracing::info!(
            files = self.uploaded_files.len(),
            delay_ms = self.analysis_delay.as_millis() as u64,
            "analysis started"
        );
        Ok(())
    }

    /// Fires the pending transition once `now` reaches the deadline.
    pub fn tick(&mut self, now: Instant) -> Option<Transition> {
        let Phase::Analyzing {
            deadline: Some(deadline),
            ..
        } = self.phase
        else {
            return None;
        };

        if now < deadline {
            return None;
        }

        self.phase = Phase::ShowingResults { selected: None };
        tracing::info!("analysis finished, showing results");
        Some(Transition::ResultsReady)
    }

    /// Time until the pending transition fires, if one is pending.
    #[must_use]
    pub fn time_until_results(&self, now: Instant) -> Option<Duration> {
        match self.phase {
            Phase::Analyzing {
                deadline: Some(deadline),
                ..
            } => Some(deadline.saturating_duration_since(now)),
            _ => None,
        }
    }

    /// Time spent analyzing so far, or `None` outside `Analyzing`.
    #[must_use]
    pub fn analysis_elapsed(&self, now: Instant) -> Option<Duration> {
        match self.phase {
            Phase::Analyzing { started_at, .. } => Some(now.saturating_duration_since(started_at)),
            _ => None,
        }
    }

    /// Drops the pending transition. Later ticks do nothing.
    pub fn dispose(&mut self) {
        if let Phase::Analyzing { deadline, .. } = &mut self.phase {
            if deadline.take().is_some() {
                tracing::debug!("pending analysis transition discarded");
            }
        }
    }

    /// Selects the record `id` when it exists in `catalog`.
    ///
    /// Returns true if the selection changed. Unknown ids and calls outside
    /// `ShowingResults` leave everything as is.
    pub fn select_record(&mut self, id: &str, catalog: &Catalog) -> bool {
        let Phase::ShowingResults { selected } = &mut self.phase else {
            return false;
        };
        if !catalog.contains(id) {
            tracing::debug!(id, "ignoring selection of unknown record");
            return false;
        }
        if selected.as_deref() == Some(id) {
            return false;
        }
        *selected = Some(id.to_string());
        true
    }

    /// Currently selected record id.
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        match &self.phase {
            Phase::ShowingResults { selected } => selected.as_deref(),
            _ => None,
        }
    }

    pub fn set_prompt(&mut self, text: impl Into<String>) {
        self.prompt = text.into();
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}
