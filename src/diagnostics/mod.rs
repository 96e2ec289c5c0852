// SPDX-License-Identifier: MPL-2.0
//! In-memory record of what the user did during this run.
//!
//! Every meaningful interaction (files offered, analysis started, a card
//! selected, an action button clicked, playback toggled) is stamped with a
//! UTC timestamp and kept in a memory-bounded ring buffer. Each entry is
//! also emitted as a `tracing` event.
//!
//! - [`CircularBuffer`]: Generic ring buffer with configurable capacity
//! - [`BufferCapacity`]: Newtype for validated buffer capacity bounds
//! - [`InteractionLog`]: The application-facing recorder

mod buffer;
mod events;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use events::{InteractionEvent, OfferSource, UserAction};

use chrono::Utc;

/// Bounded log of user interactions.
#[derive(Debug, Clone)]
pub struct InteractionLog {
    events: CircularBuffer<InteractionEvent>,
}

impl Default for InteractionLog {
    fn default() -> Self {
        Self::new(BufferCapacity::default())
    }
}

impl InteractionLog {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        Self {
            events: CircularBuffer::new(capacity),
        }
    }

    /// Stamps `action` with the current time and stores it.
    pub fn record(&mut self, action: UserAction) {
        tracing::info!(target: "minerama::interaction", "{}", action);
        self.events.push(InteractionEvent {
            timestamp: Utc::now(),
            action,
        });
    }

    /// Events in chronological order (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &InteractionEvent> {
        self.events.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.events.capacity()
    }

    /// Most recent event, if any.
    #[must_use]
    pub fn last(&self) -> Option<&InteractionEvent> {
        self.events.iter().next_back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MIN_INTERACTION_LOG_CAPACITY;

    #[test]
    fn record_keeps_chronological_order() {
        let mut log = InteractionLog::default();
        log.record(UserAction::AnalysisStarted { file_count: 1 });
        log.record(UserAction::ResultsShown);

        let actions: Vec<_> = log.iter().map(|e| e.action.clone()).collect();
        assert_eq!(
            actions,
            vec![
                UserAction::AnalysisStarted { file_count: 1 },
                UserAction::ResultsShown
            ]
        );
        assert!(log.iter().next().unwrap().timestamp <= log.last().unwrap().timestamp);
    }

    #[test]
    fn log_is_bounded_by_capacity() {
        let mut log = InteractionLog::new(BufferCapacity::new(0));
        assert_eq!(log.capacity(), MIN_INTERACTION_LOG_CAPACITY);

        for i in 0..(MIN_INTERACTION_LOG_CAPACITY + 5) {
            log.record(UserAction::RecordSelected { id: i.to_string() });
        }

        assert_eq!(log.len(), MIN_INTERACTION_LOG_CAPACITY);
        assert_eq!(
            log.iter().next().map(|e| &e.action),
            Some(&UserAction::RecordSelected { id: "5".into() })
        );
    }
}
